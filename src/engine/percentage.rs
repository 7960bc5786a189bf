//! Cálculo del porcentaje de vida restante

use super::EngineError;

/// Porcentaje restante hasta el próximo servicio, en [0, 100].
///
/// `remaining = due - current`; vencido (`remaining <= 0`) es 0. Si no,
/// `round(remaining / interval * 100)` con redondeo half-up, limitado a 100
/// para lecturas antiguas posteriores a un reinicio.
pub fn calculate_percentage(
    current_distance: i64,
    due_at_distance: i64,
    interval: i64,
) -> Result<u8, EngineError> {
    if interval <= 0 {
        return Err(EngineError::InvalidInterval(interval));
    }

    let remaining = i128::from(due_at_distance) - i128::from(current_distance);
    if remaining <= 0 {
        return Ok(0);
    }

    // floor((200 * remaining + interval) / (2 * interval)) == round-half-up(100 * remaining / interval)
    let interval = i128::from(interval);
    let raw = (remaining * 200 + interval) / (interval * 2);
    let clamped = raw.clamp(0, 100);

    debug_assert!((0..=100).contains(&clamped), "percentage out of range: {}", clamped);
    Ok(clamped as u8)
}

/// Distancia que falta para el vencimiento (nunca negativa)
pub fn remaining_distance(current_distance: i64, due_at_distance: i64) -> i64 {
    due_at_distance.saturating_sub(current_distance).max(0)
}
