//! Property adapters: views that let a panel control read and write one
//! numeric field of a shared object, converting on the way.
//!
//! An adapter holds no value of its own. Every `read` goes to the target and
//! every `write` lands on it immediately, unvalidated.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;

/// Read/write access to one field, as seen by a control.
pub trait Adapter {
    /// What the control hands to `write`.
    type Input;
    /// What `read` hands back to the control.
    type Output;

    /// Default label shown next to the control.
    fn label(&self) -> &str;
    fn read(&self) -> Self::Output;
    fn write(&self, value: Self::Input);
}

/// Identity adapter over `(target, field)`.
///
/// The field is addressed through a getter/setter pair of plain function
/// pointers so the adapter stays `Clone` and carries no closures.
pub struct Property<T> {
    target: Rc<RefCell<T>>,
    label: String,
    get: fn(&T) -> f64,
    set: fn(&mut T, f64),
}

impl<T> Property<T> {
    pub fn new(
        target: Rc<RefCell<T>>,
        label: impl Into<String>,
        get: fn(&T) -> f64,
        set: fn(&mut T, f64),
    ) -> Self {
        Self { target, label: label.into(), get, set }
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
            label: self.label.clone(),
            get: self.get,
            set: self.set,
        }
    }
}

impl<T> Adapter for Property<T> {
    type Input = f64;
    type Output = f64;

    fn label(&self) -> &str {
        &self.label
    }

    fn read(&self) -> f64 {
        (self.get)(&self.target.borrow())
    }

    fn write(&self, value: f64) {
        (self.set)(&mut self.target.borrow_mut(), value);
    }
}

/// Shows a radian field in degrees.
///
/// Writes convert back to radians and store the result as-is: NaN, infinities
/// and values past a full turn are not corrected.
pub struct DegRad<T>(Property<T>);

impl<T> DegRad<T> {
    pub fn new(field: Property<T>) -> Self {
        Self(field)
    }
}

impl<T> Clone for DegRad<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Adapter for DegRad<T> {
    type Input = f64;
    type Output = f64;

    fn label(&self) -> &str {
        self.0.label()
    }

    fn read(&self) -> f64 {
        self.0.read().to_degrees()
    }

    fn write(&self, degrees: f64) {
        self.0.write(degrees.to_radians());
    }
}

/// Lets a text-valued control drive a numeric field.
///
/// `read` returns the field unchanged. `write` stores [`parse_float`] of the
/// text; input without a numeric prefix stores NaN, which is logged.
pub struct StringToNumber<T>(Property<T>);

impl<T> StringToNumber<T> {
    pub fn new(field: Property<T>) -> Self {
        Self(field)
    }
}

impl<T> Clone for StringToNumber<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Adapter for StringToNumber<T> {
    type Input = String;
    type Output = f64;

    fn label(&self) -> &str {
        self.0.label()
    }

    fn read(&self) -> f64 {
        self.0.read()
    }

    fn write(&self, text: String) {
        let value = parse_float(&text);
        if value.is_nan() {
            warn!("{}: {text:?} has no numeric prefix, storing NaN", self.0.label());
        }
        self.0.write(value);
    }
}

/// Parses the longest numeric prefix of `s`, the way JavaScript's
/// `parseFloat` does.
///
/// Leading whitespace is skipped. The prefix may carry a sign, digits with an
/// optional fraction, and an exponent that is only taken when it has digits.
/// `Infinity` is recognised. Anything else yields NaN.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    if s[i..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_len = digits(i);
    let int_part = &s[i..i + int_len];
    i += int_len;

    let mut frac_part = "";
    if bytes.get(i) == Some(&b'.') {
        let frac_len = digits(i + 1);
        frac_part = &s[i + 1..i + 1 + frac_len];
        i += 1 + frac_len;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return f64::NAN;
    }

    let mut exponent = String::new();
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        let exp_sign = match bytes.get(j) {
            Some(b'-') => {
                j += 1;
                "-"
            }
            Some(b'+') => {
                j += 1;
                ""
            }
            _ => "",
        };
        let exp_len = digits(j);
        if exp_len > 0 {
            exponent = format!("e{exp_sign}{}", &s[j..j + exp_len]);
        }
    }

    let literal = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
        exponent,
    );
    literal.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[derive(Default)]
    struct Target {
        angle: f64,
        code: f64,
    }

    fn shared() -> Rc<RefCell<Target>> {
        Rc::new(RefCell::new(Target::default()))
    }

    fn angle(t: &Rc<RefCell<Target>>) -> Property<Target> {
        Property::new(t.clone(), "angle", |t| t.angle, |t, v| t.angle = v)
    }

    fn code(t: &Rc<RefCell<Target>>) -> Property<Target> {
        Property::new(t.clone(), "code", |t| t.code, |t, v| t.code = v)
    }

    #[test]
    fn property_is_identity() {
        let t = shared();
        let p = angle(&t);
        p.write(-3.25);
        assert_eq!(t.borrow().angle, -3.25);
        assert_eq!(p.read(), -3.25);
        assert_eq!(p.label(), "angle");
    }

    #[test]
    fn degrees_round_trip_whole_turns() {
        let t = shared();
        let a = DegRad::new(angle(&t));
        for d in [0.0, 360.0, -360.0, 720.0] {
            a.write(d);
            assert!((a.read() - d).abs() < 1e-9, "{d}");
        }
    }

    #[test]
    fn degrees_are_stored_as_radians() {
        let t = shared();
        let a = DegRad::new(angle(&t));
        a.write(90.0);
        assert!((t.borrow().angle - PI / 2.0).abs() < 1e-12);
        a.write(1000.0);
        assert!((t.borrow().angle - 1000.0 * PI / 180.0).abs() < 1e-9);
    }

    #[test]
    fn degrees_do_not_validate() {
        let t = shared();
        let a = DegRad::new(angle(&t));
        a.write(f64::NAN);
        assert!(t.borrow().angle.is_nan());
        a.write(f64::INFINITY);
        assert_eq!(t.borrow().angle, f64::INFINITY);
    }

    #[test]
    fn string_writes_parse_and_reads_pass_through() {
        let t = shared();
        let s = StringToNumber::new(code(&t));
        s.write("1001".to_string());
        assert_eq!(t.borrow().code, 1001.0);
        t.borrow_mut().code = 1002.0;
        assert_eq!(s.read(), 1002.0);
    }

    #[test]
    fn garbage_text_stores_nan() {
        let t = shared();
        let s = StringToNumber::new(code(&t));
        s.write("repeat".to_string());
        assert!(t.borrow().code.is_nan());
        assert!(s.read().is_nan());
    }

    #[test]
    fn parse_float_takes_the_longest_prefix() {
        assert_eq!(parse_float("  3.5abc"), 3.5);
        assert_eq!(parse_float("-1e3x"), -1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2E+2"), 200.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float("1000"), 1000.0);
        assert_eq!(parse_float("\t\n42 "), 42.0);
    }

    #[test]
    fn parse_float_infinity_and_failures() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityx"), f64::NEG_INFINITY);
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float(".e1").is_nan());
        assert!(parse_float("inf").is_nan());
    }
}
