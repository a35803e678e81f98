//! Горизонтальная скорость для наземных состояний
//!
//! Плоская рампа ускорения делает остановку/разворот "ватными",
//! поэтому при остановке или смене направления шаг ×5.

/// Множитель шага при остановке/развороте
pub const REVERSE_ACCELERATION_MULTIPLIER: f32 = 5.0;

/// Сдвинуть `current` к `target` не более чем на `max_delta`, без перелёта
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let distance = target - current;
    if distance.abs() <= max_delta {
        return target;
    }
    current + distance.signum() * max_delta
}

/// Новая скорость по X (pure function, без скрытого состояния)
///
/// # Examples
/// ```
/// use platformer_locomotion::velocity::resolve_velocity_x;
/// // Разгон с места: шаг = max_accel * dt = 1
/// assert_eq!(resolve_velocity_x(1.0, 0.0, 5.0, 10.0, 0.1), 1.0);
/// // Разворот: шаг ×5
/// assert_eq!(resolve_velocity_x(-1.0, 3.0, 5.0, 10.0, 0.1), -2.0);
/// ```
pub fn resolve_velocity_x(x_input: f32, current_vx: f32, max_speed: f32, max_accel: f32, dt: f32) -> f32 {
    let desired = x_input * max_speed;
    let max_change = max_accel * dt;

    let reversing = x_input == 0.0 || (current_vx != 0.0 && x_input.signum() != current_vx.signum());

    let step = if reversing {
        REVERSE_ACCELERATION_MULTIPLIER * max_change
    } else {
        max_change
    };

    move_toward(current_vx, desired, step)
}
