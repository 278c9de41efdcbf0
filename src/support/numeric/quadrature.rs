/// Integrates `f` over `[lower, upper]` with the composite trapezoidal rule.
///
/// Uses `steps` equally sized trapezoids. A `steps` of zero yields zero.
///
/// # Errors
///
/// Returns the first error raised by an evaluation of `f`.
pub fn trapezoid<E>(
    mut f: impl FnMut(f64) -> Result<f64, E>,
    lower: f64,
    upper: f64,
    steps: usize,
) -> Result<f64, E> {
    if steps == 0 {
        return Ok(0.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let h = (upper - lower) / steps as f64;

    let mut sum = 0.5 * (f(lower)? + f(upper)?);
    for i in 1..steps {
        #[allow(clippy::cast_precision_loss)]
        let x = lower + h * i as f64;
        sum += f(x)?;
    }

    Ok(sum * h)
}
