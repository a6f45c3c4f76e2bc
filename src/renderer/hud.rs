//! HUD and menu text

use glam::Vec3;

use super::TextRenderer;
use crate::sim::{GamePhase, GameSession};

const HUD_SCALE: f32 = 1.0;
const WIN_TINT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub fn draw(session: &GameSession, text: &mut dyn TextRenderer) {
    text.render_text(&format!("Lives:{}", session.lives), 5.0, 5.0, HUD_SCALE, Vec3::ONE);

    let mid_x = session.width / 2.0;
    let mid_y = session.height / 2.0;
    match session.phase {
        GamePhase::Menu => {
            text.render_text("Press ENTER to start", mid_x - 50.0, mid_y, HUD_SCALE, Vec3::ONE);
            text.render_text(
                "Press W or S to select level",
                mid_x - 75.0,
                mid_y + 20.0,
                0.75,
                Vec3::ONE,
            );
        }
        GamePhase::Win => {
            text.render_text("You WON!!!", mid_x - 80.0, mid_y - 20.0, HUD_SCALE, WIN_TINT);
            text.render_text(
                "Press ENTER to retry or ESC to quit",
                mid_x - 130.0,
                mid_y,
                HUD_SCALE,
                Vec3::new(1.0, 1.0, 0.0),
            );
        }
        GamePhase::Active => {}
    }
}
