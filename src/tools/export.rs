//! Literal export in host-language syntax.
//!
//! Produces what `var_export` would print, using the short array syntax and
//! keeping everything on one line: `[1, null, true, 1.2, 'abc', ['nested']]`.

use std::fmt::Write;

use crate::hir::{ArrayKey, Literal};

/// Render a literal as source code.
pub fn export_literal(value: &Literal) -> String {
    let mut out = String::new();
    write_literal(&mut out, value);
    out
}

fn write_literal(out: &mut String, value: &Literal) {
    match value {
        Literal::Null => out.push_str("null"),
        Literal::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Literal::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Literal::Float(f) => out.push_str(&export_float(*f)),
        Literal::String(s) => write_string(out, s),
        Literal::Array(entries) => {
            let is_list = entries
                .iter()
                .enumerate()
                .all(|(i, (key, _))| *key == ArrayKey::Int(i as i64));

            out.push('[');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i != 0 {
                    out.push_str(", ");
                }
                if !is_list {
                    match key {
                        ArrayKey::Int(k) => {
                            let _ = write!(out, "{k}");
                        }
                        ArrayKey::String(k) => write_string(out, k),
                    }
                    out.push_str(" => ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Floats always carry a decimal point or exponent so they read back as
/// floats: `1.0`, `1.2`, `1.0E+25`.
fn export_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e15).contains(&abs) {
        let scientific = format!("{f:E}");
        let (mantissa, exponent) = scientific.split_once('E').unwrap_or((&scientific, "0"));
        let mantissa = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{mantissa}.0")
        };
        let exponent = if exponent.starts_with('-') {
            exponent.to_string()
        } else {
            format!("+{exponent}")
        };
        return format!("{mantissa}E{exponent}");
    }

    let plain = format!("{f}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}
