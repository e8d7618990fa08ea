//! Valeur du pool de constantes.
//!
//! Le core ne connaît qu'un seul genre de valeur : un flottant 64 bits.

use core::fmt;

/// Scalaire numérique (f64).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Value(pub f64);

impl Value {
    /// Nombre porté par la valeur.
    #[must_use]
    pub const fn as_f64(self) -> f64 { self.0 }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Self(v) }
}

impl From<Value> for f64 {
    fn from(v: Value) -> Self { v.0 }
}

/// Affichage à la `%g` : 6 chiffres significatifs, zéros de queue retirés,
/// notation exponentielle si l'exposant décimal est `< -4` ou `>= 6`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_g(self.0))
    }
}

const SIGNIFICANT: i32 = 6;

fn format_g(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf".into() } else { "inf".into() };
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    // L'exposant se lit après arrondi à 6 chiffres significatifs.
    let sci = format!("{:.*e}", (SIGNIFICANT - 1) as usize, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..SIGNIFICANT).contains(&exp) {
        let decimals = usize::try_from(SIGNIFICANT - 1 - exp).unwrap_or(0);
        trim_fraction(&format!("{v:.decimals$}")).to_owned()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.unsigned_abs())
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}
