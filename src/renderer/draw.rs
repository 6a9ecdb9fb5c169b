//! Per-entity drawing
//!
//! Each drawable turns itself into triangles appended to a shared list. The
//! simulation types know nothing about this module.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::{Asteroid, Bonus, BonusKind, Entity, Explosion, Particle, Ship, Star};

/// Something that can append itself to a frame's triangle list
pub trait Draw {
    fn draw(&self, out: &mut Vec<Vertex>);
}

impl Draw for Star {
    fn draw(&self, out: &mut Vec<Vertex>) {
        shapes::circle(out, self.pos, self.radius, with_alpha(colors::STAR, self.alpha), 6);
    }
}

impl Draw for Particle {
    fn draw(&self, out: &mut Vec<Vertex>) {
        if !self.is_active() {
            return;
        }
        let color = with_alpha(self.color, self.opacity());
        shapes::circle(out, self.body.pos, self.radius, color, 8);
    }
}

impl Draw for Explosion {
    fn draw(&self, out: &mut Vec<Vertex>) {
        if !self.active {
            return;
        }
        for particle in &self.particles {
            particle.draw(out);
        }
    }
}

impl Draw for Ship {
    fn draw(&self, out: &mut Vec<Vertex>) {
        for particle in &self.trail {
            particle.draw(out);
        }
        ship_hull(self, out);
    }
}

/// The ship without its exhaust trail
pub fn ship_hull(ship: &Ship, out: &mut Vec<Vertex>) {
    let Vec2 { x, y } = ship.body.pos;
    let Vec2 { x: w, y: h } = ship.body.size;
    let at = |fx: f32, fy: f32| Vec2::new(x + w * fx, y + h * fy);

    // Hull: nose, right wing, tail, left wing
    let hull = [
        at(0.5, 0.0),
        at(0.8, 0.7),
        at(0.6, 1.0),
        at(0.4, 1.0),
        at(0.2, 0.7),
    ];
    shapes::polygon_fan(out, at(0.5, 0.6), &hull, colors::SHIP_HULL);

    shapes::circle(out, at(0.5, 0.3), w * 0.15, colors::SHIP_COCKPIT, 12);

    shapes::rect(out, at(0.25, 0.8), at(0.4, 1.0), colors::SHIP_ENGINE);
    shapes::rect(out, at(0.6, 0.8), at(0.75, 1.0), colors::SHIP_ENGINE);
}

impl Draw for Asteroid {
    fn draw(&self, out: &mut Vec<Vertex>) {
        let center = self.body.center();
        let points: Vec<Vec2> = self.rotated_outline().map(|p| center + p).collect();
        shapes::polygon_fan(out, center, &points, self.color);
        shapes::polyline_closed(out, &points, 3.0, colors::ASTEROID_OUTLINE);
    }
}

impl Draw for Bonus {
    fn draw(&self, out: &mut Vec<Vertex>) {
        if self.is_collected() {
            return;
        }
        let center = self.body.center();
        let width = self.body.size.x;
        let pulse = self.pulse_scale();
        let color = self.kind.color();

        // Glow fades out toward the rim
        shapes::radial_circle(
            out,
            center,
            width * 0.8 * pulse,
            with_alpha(color, 100.0 / 255.0),
            with_alpha(color, 0.0),
            20,
        );

        let radius = width * 0.4 * pulse;
        match self.kind {
            BonusKind::Score => shapes::star(out, center, radius, color),
            BonusKind::Life => shapes::heart(out, center, radius, color),
            BonusKind::Shield => shapes::shield(out, center, radius, color),
        }
    }
}
