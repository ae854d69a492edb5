/// Float formatting helpers for wasm.
///
/// Rust's core float-to-decimal formatting has had wasm-facing panics in some
/// toolchain/browser combinations. To avoid that class of issues, these
/// helpers do **not** use `format!` on floats.
///
/// They:
/// - Handle `NaN`/`±Inf` explicitly.
/// - For finite values, scale + round into an `i64`, then format integers.

fn non_finite(negative: bool) -> String {
    if negative {
        "-Inf".to_string()
    } else {
        "Inf".to_string()
    }
}

pub fn fmt_f64_fixed(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return non_finite(v.is_sign_negative());
    }

    let decimals = decimals.min(9);
    let scale_i64 = 10_i64.pow(decimals as u32);

    let scaled = (v * scale_i64 as f64).round();
    if !scaled.is_finite() || scaled.abs() > (i64::MAX as f64) {
        return non_finite(v.is_sign_negative());
    }

    let scaled_i = scaled as i64;
    // A value that rounds to zero prints without a sign.
    let negative = scaled_i < 0;

    let abs_i = scaled_i.abs();
    let int_part = abs_i / scale_i64;
    let frac_part = abs_i % scale_i64;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if decimals > 0 {
        out.push('.');
        let frac_str = frac_part.to_string();
        for _ in 0..decimals.saturating_sub(frac_str.len()) {
            out.push('0');
        }
        out.push_str(&frac_str);
    }

    out
}
