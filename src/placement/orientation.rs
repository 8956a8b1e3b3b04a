/// Map a uniform draw `u` in `[0, 1)` to a heavy-tailed value centered on 0.
///
/// Computes `x / sqrt(1 - x²)` with `x = 2u - 1`. This is odd about
/// `u = 0.5` and diverges to `±∞` at the ends of the interval, so its output
/// must never be treated as bounded; callers clamp whatever they derive from
/// it. The tails are much heavier than a Gaussian's.
#[must_use]
pub fn pseudo_normal(u: f32) -> f32 {
    let x = 2.0 * u - 1.0;
    x / (1.0 - x * x).sqrt()
}
