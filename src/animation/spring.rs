//! Damped-spring progress curve used by the reference scheduler.

use std::time::Duration;

/// Fixed duration of every presentation and dismissal transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// Spring damping handed to the scheduler. Tuned by eye; any value `>= 1`
/// settles without overshoot.
pub const SPRING_DAMPING: f64 = 300.0;

/// Initial spring velocity handed to the scheduler, in units of the total
/// distance per transition duration.
pub const SPRING_INITIAL_VELOCITY: f64 = 5.0;

// Natural frequency of the normalised spring, in radians per transition duration.
const NATURAL_FREQUENCY: f64 = 10.0;

/// Spring timing handed to the host scheduler.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// Damping ratio. `>= 1` never overshoots.
    pub damping: f64,
    /// Initial velocity, in total distances per duration.
    pub initial_velocity: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: SPRING_DAMPING,
            initial_velocity: SPRING_INITIAL_VELOCITY,
        }
    }
}

impl SpringParams {
    /// Progress of the spring at normalised time `t` in `[0, 1]`.
    ///
    /// Returns exactly `0.0` at `t <= 0` and exactly `1.0` at `t >= 1`.
    pub fn progress(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let omega = NATURAL_FREQUENCY;
        let v = self.initial_velocity;
        let zeta = self.damping.max(0.0);
        if zeta >= 1.0 {
            // Critically damped with x(0) = 0, x'(0) = v.
            1.0 - (1.0 + (omega - v) * t) * (-omega * t).exp()
        } else {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            let sin_coeff = (zeta * omega - v) / omega_d;
            1.0 - decay * ((omega_d * t).cos() + sin_coeff * (omega_d * t).sin())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
