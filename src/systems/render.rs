use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::anchor::Anchor;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::resources::crowdpool::CrowdPool;
use crate::resources::debugmode::DebugMode;
use crate::resources::stage::Stage;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;

/// 2D drawing surface with a canvas-style transform stack.
///
/// `draw_image_region` draws the `src` crop of a texture with its top-left
/// corner at the current origin, unscaled except through the transform.
pub trait DrawSurface {
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn draw_image_region(&mut self, tex_key: &str, src: Rectangle);
}

/// Translation plus axis-aligned scale. Enough for flips, no rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub tx: f32,
    pub ty: f32,
    pub sx: f32,
    pub sy: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Transform2D {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }
}

impl Transform2D {
    /// Move the origin by `(x, y)` in the current (scaled) space.
    pub fn translate(&mut self, x: f32, y: f32) {
        self.tx += self.sx * x;
        self.ty += self.sy * y;
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.sx *= sx;
        self.sy *= sy;
    }

    /// Screen rectangle covered by a `w` x `h` box drawn at the origin.
    pub fn dest_rect(&self, w: f32, h: f32) -> Rectangle {
        let dw = self.sx * w;
        let dh = self.sy * h;
        Rectangle {
            x: self.tx + dw.min(0.0),
            y: self.ty + dh.min(0.0),
            width: dw.abs(),
            height: dh.abs(),
        }
    }
}

/// [`DrawSurface`] on top of a raylib draw handle.
///
/// Raylib has no canvas-style state stack, so transforms are tracked here
/// and folded into each `draw_texture_pro` call. Negative scale flips the
/// source rectangle.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a TextureStore,
    background: Color,
    current: Transform2D,
    stack: Vec<Transform2D>,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(d: &'a mut D, textures: &'a TextureStore, background: Color) -> Self {
        RaylibSurface {
            d,
            textures,
            background,
            current: Transform2D::default(),
            stack: Vec::new(),
        }
    }
}

impl<D: RaylibDraw> DrawSurface for RaylibSurface<'_, D> {
    fn clear(&mut self) {
        self.d.clear_background(self.background);
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.current.translate(x, y);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.current.scale(sx, sy);
    }

    fn draw_image_region(&mut self, tex_key: &str, src: Rectangle) {
        let Some(tex) = self.textures.get(tex_key) else {
            return;
        };
        let dest = self.current.dest_rect(src.width, src.height);
        let mut src = src;
        if self.current.sx < 0.0 {
            src.width = -src.width;
        }
        if self.current.sy < 0.0 {
            src.height = -src.height;
        }
        self.d.draw_texture_pro(
            tex,
            src,
            dest,
            Vector2 { x: 0.0, y: 0.0 },
            0.0,
            Color::WHITE,
        );
    }
}

/// Draw the crowd back to front.
///
/// Reads the pool's active list (already sorted by anchor) and never
/// advances animation. Every peep's transform is wrapped in save/restore so
/// it does not leak into the next one.
pub fn render_crowd<S: DrawSurface>(world: &World, surface: &mut S) {
    surface.clear();
    let Some(pool) = world.get_resource::<CrowdPool>() else {
        return;
    };
    let ratio = world
        .get_resource::<Stage>()
        .map_or(1.0, |stage| stage.pixel_ratio);

    surface.save();
    surface.scale(ratio, ratio);
    for peep in pool.active() {
        let (Some(sprite), Some(pos)) = (
            world.get::<Sprite>(peep.entity),
            world.get::<MapPosition>(peep.entity),
        ) else {
            continue;
        };
        surface.save();
        surface.translate(pos.pos.x, pos.pos.y);
        surface.scale(sprite.scale_x(), 1.0);
        surface.draw_image_region(&sprite.tex_key, sprite.rect);
        surface.restore();
    }
    surface.restore();
}

/// Crowd statistics, drawn on top when [`DebugMode`] is present.
pub fn render_debug_ui(world: &World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let fps = d.get_fps();
    let elapsed = world
        .get_resource::<WorldTime>()
        .map_or(0.0, |time| time.elapsed);
    let text = format!(
        "DEBUG MODE (press F11 to toggle) | FPS: {} | Time: {:.1}s",
        fps, elapsed
    );
    d.draw_text(&text, 10, 10, 10, Color::BLACK);

    if let Some(pool) = world.get_resource::<CrowdPool>() {
        let text = format!(
            "Peeps: {} active / {} idle / {} total",
            pool.active().len(),
            pool.idle().len(),
            pool.total()
        );
        d.draw_text(&text, 10, 30, 10, Color::BLACK);

        let ratio = world
            .get_resource::<Stage>()
            .map_or(1.0, |stage| stage.pixel_ratio);
        for peep in pool.active() {
            let Some(anchor) = world.get::<Anchor>(peep.entity) else {
                continue;
            };
            let y = (anchor.0 * ratio) as i32;
            d.draw_line(0, y, 5, y, Color::RED);
        }
    }
    if let Some(stage) = world.get_resource::<Stage>() {
        let text = format!(
            "Stage: {:.0}x{:.0} @{:.2}x",
            stage.w, stage.h, stage.pixel_ratio
        );
        d.draw_text(&text, 10, 50, 10, Color::BLACK);
    }
}
