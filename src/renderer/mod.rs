//! Rendering collaborators and the per-frame draw pass
//!
//! The game never touches pixels, shaders or textures directly. A host
//! implements these narrow traits (sprite batcher, text renderer, texture
//! cache) and the draw pass describes each frame through them. Post-processing
//! reads `GameSession::effects` on its own.

pub mod hud;

use glam::{Vec2, Vec3};

use crate::sim::{Entity, GameSession, SpriteSet, TextureHandle};

/// Texture lookup, queried once at construction time
pub trait Resources {
    fn texture(&self, name: &str) -> TextureHandle;
}

/// Textured quad drawing
pub trait SpriteRenderer {
    /// `pos` is the top-left corner; `rotation` is in degrees about the sprite center
    fn draw_sprite(&mut self, texture: TextureHandle, pos: Vec2, size: Vec2, rotation: f32, tint: Vec3);
}

/// Bitmap text drawing
pub trait TextRenderer {
    fn render_text(&mut self, text: &str, x: f32, y: f32, scale: f32, tint: Vec3);
}

/// Resolve every texture the game uses through the resource collaborator
pub fn resolve_sprites(resources: &dyn Resources) -> SpriteSet {
    SpriteSet::resolve(|name| resources.texture(name))
}

fn draw_entity(sprites: &mut dyn SpriteRenderer, entity: &Entity) {
    sprites.draw_sprite(entity.sprite, entity.pos, entity.size, entity.rotation, entity.tint);
}

/// Draw the whole scene: background, bricks, paddle, falling power-ups, ball, HUD
pub fn render(session: &GameSession, sprites: &mut dyn SpriteRenderer, text: &mut dyn TextRenderer) {
    sprites.draw_sprite(session.sprites.background, Vec2::ZERO, session.screen_size(), 0.0, Vec3::ONE);

    for brick in session.level().bricks.iter().filter(|b| !b.destroyed) {
        draw_entity(sprites, brick);
    }
    draw_entity(sprites, &session.paddle.body);
    for powerup in session.powerups.iter().filter(|p| !p.body.destroyed) {
        draw_entity(sprites, &powerup.body);
    }
    draw_entity(sprites, &session.ball.body);

    hud::draw(session, text);
}
