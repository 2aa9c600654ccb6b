//! Custom properties attached to maps, layers, objects, tilesets and tiles.

use std::collections::HashMap;

/// A single typed custom property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `bool`
    Bool(bool),
    /// `int` and `object` references.
    I64(i64),
    /// `float`
    F32(f32),
    /// `string`, `file` and `color`.
    String(String),
}

/// Name → value lookup for custom properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: HashMap<String, PropertyValue>,
}

impl Properties {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a property.
    pub fn insert(&mut self, name: String, value: PropertyValue) {
        self.values.insert(name, value);
    }

    /// Untyped lookup.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True without any property.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name/value pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `None` when missing or not a bool.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// `None` when missing or not an int.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            PropertyValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// `None` when the value is missing, not an int, or out of `i32` range.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    /// Floats, and ints widened to float.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            PropertyValue::F32(v) => Some(*v),
            PropertyValue::I64(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// `None` when missing or not a string.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PropertyValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}
