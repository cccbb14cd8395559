//! Parameter values and the sorted parameter set handed to signers and transports.

// std
use std::{borrow::Cow, collections::btree_map};
// self
use crate::_prelude::*;

/// A single request parameter value.
///
/// Deserializes from any JSON scalar, so a flat JSON object maps straight onto a
/// [`ParameterSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// Explicitly absent value. Never signed.
	Null,
	/// Boolean flag, rendered as `true`/`false`.
	Bool(bool),
	/// Integral number.
	Int(i64),
	/// Floating-point number.
	Float(f64),
	/// Text value.
	Text(String),
}
impl ParamValue {
	/// Returns true for values that canonicalization drops: null, the empty string, and the
	/// literal string `undefined`.
	///
	/// The literal `undefined` is what a JavaScript caller produces when it stringifies a
	/// missing value, and existing backends skip it when verifying signatures.
	pub fn is_blank(&self) -> bool {
		match self {
			ParamValue::Null => true,
			ParamValue::Text(text) => text.is_empty() || text == "undefined",
			_ => false,
		}
	}

	/// Renders the value the way it appears in a canonical string (before URL encoding).
	pub fn render(&self) -> Cow<'_, str> {
		match self {
			ParamValue::Null => Cow::Borrowed(""),
			ParamValue::Bool(flag) => Cow::Borrowed(if *flag { "true" } else { "false" }),
			ParamValue::Int(number) => Cow::Owned(number.to_string()),
			ParamValue::Float(number) => Cow::Owned(render_float(*number)),
			ParamValue::Text(text) => Cow::Borrowed(text),
		}
	}

	/// Returns the text payload, if this is a text value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ParamValue::Text(text) => Some(text),
			_ => None,
		}
	}
}
impl Display for ParamValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.render())
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}
impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Int(value.into())
	}
}
impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}
impl<T> From<Option<T>> for ParamValue
where
	T: Into<ParamValue>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Mapping from parameter name to value with unique keys.
///
/// Iteration is always in byte-wise ascending key order, independent of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);
impl ParameterSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a parameter, returning the value it replaced.
	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<ParamValue>,
	) -> Option<ParamValue> {
		self.0.insert(key.into(), value.into())
	}

	/// Chaining variant of [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Looks up a parameter.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	/// Removes a parameter.
	pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
		self.0.remove(key)
	}

	/// Returns true if the key is present (even with a blank value).
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the set is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates parameters in byte-wise ascending key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Merges `other` into `self`; values from `other` win on key collision.
	pub fn merge(&mut self, other: ParameterSet) {
		self.0.extend(other.0);
	}
}
impl<K, V> FromIterator<(K, V)> for ParameterSet
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
impl IntoIterator for ParameterSet {
	type IntoIter = btree_map::IntoIter<String, ParamValue>;
	type Item = (String, ParamValue);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

// JavaScript `String(number)`: shortest round-trip digits, positional between 1e-6 and 1e21,
// exponential (`1e+21`, `1.5e-7`) outside that range.
fn render_float(number: f64) -> String {
	if number.is_nan() {
		return "NaN".into();
	}
	if number.is_infinite() {
		return if number.is_sign_positive() { "Infinity" } else { "-Infinity" }.into();
	}
	if number == 0.0 {
		return "0".into();
	}

	let magnitude = number.abs();

	if (1e-6..1e21).contains(&magnitude) {
		return number.to_string();
	}

	let exponential = format!("{number:e}");

	match exponential.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') =>
			format!("{mantissa}e+{exponent}"),
		_ => exponential,
	}
}
