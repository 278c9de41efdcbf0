/// Approximates `df/dx` at `x` with a central difference of step `h`.
///
/// Returns `(f(x + h) − f(x − h)) / (2h)`.
///
/// # Errors
///
/// Returns the first error raised by either evaluation of `f`.
pub fn symmetric_difference<E>(
    mut f: impl FnMut(f64) -> Result<f64, E>,
    x: f64,
    h: f64,
) -> Result<f64, E> {
    let plus = f(x + h)?;
    let minus = f(x - h)?;
    Ok((plus - minus) / (2.0 * h))
}
