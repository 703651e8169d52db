//! Read-only column views.
//!
//! A [`VArray`] is either a single value broadcast over a length, a slice
//! borrowed from an attribute store, or an owned column produced by a
//! conversion. Consumers index it without caring which.
//!
//! ```
//! use rhizome_resin_core::VArray;
//!
//! let broadcast = VArray::single(2.0f32, 3);
//! let borrowed = VArray::Span(&[1.0f32, 2.0, 3.0][..]);
//!
//! assert_eq!(broadcast.len(), borrowed.len());
//! assert_eq!(broadcast[1], 2.0);
//! assert_eq!(borrowed.to_vec(), vec![1.0, 2.0, 3.0]);
//! ```

use std::ops::Index;

use glam::{Vec2, Vec3, Vec4};

use crate::conversions;
use crate::store::{AttributeData, AttributeSlice};
use crate::value::{AttributeScalar, AttributeType, AttributeValue};

/// A typed, read-only column.
#[derive(Debug, Clone, PartialEq)]
pub enum VArray<'a, T> {
    /// One value repeated `len` times.
    Single {
        /// The repeated value.
        value: T,
        /// Number of elements.
        len: usize,
    },
    /// A borrowed column.
    Span(&'a [T]),
    /// An owned column.
    Owned(Vec<T>),
}

impl<'a, T: Copy> VArray<'a, T> {
    /// Creates a broadcast column.
    pub fn single(value: T, len: usize) -> Self {
        VArray::Single { value, len }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            VArray::Single { len, .. } => *len,
            VArray::Span(s) => s.len(),
            VArray::Owned(v) => v.len(),
        }
    }

    /// Returns true if the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the column is a broadcast value.
    pub fn is_single(&self) -> bool {
        matches!(self, VArray::Single { .. })
    }

    /// Returns the broadcast value, if this is one.
    pub fn as_single(&self) -> Option<T> {
        match self {
            VArray::Single { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Gets a single element.
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            VArray::Single { value, len } => (index < *len).then_some(*value),
            VArray::Span(s) => s.get(index).copied(),
            VArray::Owned(v) => v.get(index).copied(),
        }
    }

    /// Iterates over all elements.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Copies the column into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            VArray::Single { value, len } => vec![*value; *len],
            VArray::Span(s) => s.to_vec(),
            VArray::Owned(v) => v.clone(),
        }
    }
}

impl<T: Copy> Index<usize> for VArray<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self {
            VArray::Single { value, len } => {
                assert!(index < *len, "index {index} out of range for length {len}");
                value
            }
            VArray::Span(s) => &s[index],
            VArray::Owned(v) => &v[index],
        }
    }
}

/// A column view whose element type is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum GVArray<'a> {
    /// Boolean column.
    Bool(VArray<'a, bool>),
    /// Integer column.
    Int(VArray<'a, i32>),
    /// Float column.
    Float(VArray<'a, f32>),
    /// 2D vector column.
    Float2(VArray<'a, Vec2>),
    /// 3D vector column.
    Float3(VArray<'a, Vec3>),
    /// Color column.
    Color(VArray<'a, Vec4>),
}

macro_rules! each_array {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            GVArray::Bool($v) => $body,
            GVArray::Int($v) => $body,
            GVArray::Float($v) => $body,
            GVArray::Float2($v) => $body,
            GVArray::Float3($v) => $body,
            GVArray::Color($v) => $body,
        }
    };
}

impl<'a> GVArray<'a> {
    /// Creates a broadcast column of `value`.
    pub fn single(value: AttributeValue, len: usize) -> Self {
        match value {
            AttributeValue::Bool(v) => GVArray::Bool(VArray::single(v, len)),
            AttributeValue::Int(v) => GVArray::Int(VArray::single(v, len)),
            AttributeValue::Float(v) => GVArray::Float(VArray::single(v, len)),
            AttributeValue::Float2(v) => GVArray::Float2(VArray::single(v, len)),
            AttributeValue::Float3(v) => GVArray::Float3(VArray::single(v, len)),
            AttributeValue::Color(v) => GVArray::Color(VArray::single(v, len)),
        }
    }

    /// Wraps a borrowed column.
    pub fn from_slice(slice: AttributeSlice<'a>) -> Self {
        match slice {
            AttributeSlice::Bool(v) => GVArray::Bool(VArray::Span(v)),
            AttributeSlice::Int(v) => GVArray::Int(VArray::Span(v)),
            AttributeSlice::Float(v) => GVArray::Float(VArray::Span(v)),
            AttributeSlice::Float2(v) => GVArray::Float2(VArray::Span(v)),
            AttributeSlice::Float3(v) => GVArray::Float3(VArray::Span(v)),
            AttributeSlice::Color(v) => GVArray::Color(VArray::Span(v)),
        }
    }

    /// Wraps an owned column.
    pub fn from_data(data: AttributeData) -> Self {
        match data {
            AttributeData::Bool(v) => GVArray::Bool(VArray::Owned(v)),
            AttributeData::Int(v) => GVArray::Int(VArray::Owned(v)),
            AttributeData::Float(v) => GVArray::Float(VArray::Owned(v)),
            AttributeData::Float2(v) => GVArray::Float2(VArray::Owned(v)),
            AttributeData::Float3(v) => GVArray::Float3(VArray::Owned(v)),
            AttributeData::Color(v) => GVArray::Color(VArray::Owned(v)),
        }
    }

    /// Returns the element type.
    pub fn data_type(&self) -> AttributeType {
        match self {
            GVArray::Bool(_) => AttributeType::Bool,
            GVArray::Int(_) => AttributeType::Int,
            GVArray::Float(_) => AttributeType::Float,
            GVArray::Float2(_) => AttributeType::Float2,
            GVArray::Float3(_) => AttributeType::Float3,
            GVArray::Color(_) => AttributeType::Color,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        each_array!(self, v => v.len())
    }

    /// Returns true if the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the column is a broadcast value.
    pub fn is_single(&self) -> bool {
        each_array!(self, v => v.is_single())
    }

    /// Gets a single element.
    pub fn get(&self, index: usize) -> Option<AttributeValue> {
        each_array!(self, v => v.get(index).map(|x| x.into_value()))
    }

    /// Returns the broadcast value, if this is one.
    pub fn as_single(&self) -> Option<AttributeValue> {
        each_array!(self, v => v.as_single().map(|x| x.into_value()))
    }

    /// Converts the column to `data_type`.
    ///
    /// Broadcast values stay broadcast; other columns become owned copies.
    /// A column already of `data_type` is returned unchanged.
    pub fn convert(self, data_type: AttributeType) -> GVArray<'a> {
        if self.data_type() == data_type {
            return self;
        }
        let len = self.len();
        if let Some(value) = self.as_single() {
            return GVArray::single(conversions::convert(value, data_type), len);
        }
        let values = (0..len).filter_map(|i| self.get(i));
        GVArray::from_data(AttributeData::from_values(data_type, values))
    }

    /// Recovers a typed view, converting if necessary.
    pub fn into_typed<T: AttributeScalar>(self) -> VArray<'a, T> {
        match T::unwrap(self.convert(T::TYPE)) {
            Ok(array) => array,
            // `convert` always yields the requested type.
            Err(other) => VArray::single(T::default(), other.len()),
        }
    }
}

impl<'a, T: AttributeScalar> From<VArray<'a, T>> for GVArray<'a> {
    fn from(array: VArray<'a, T>) -> Self {
        T::wrap(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let v = VArray::single(Vec3::X, 4);
        assert_eq!(v.len(), 4);
        assert!(v.is_single());
        assert_eq!(v[3], Vec3::X);
        assert_eq!(v.get(4), None);
    }

    #[test]
    #[should_panic]
    fn test_single_index_out_of_range() {
        let v = VArray::single(1i32, 2);
        let _ = v[2];
    }

    #[test]
    fn test_span_and_owned() {
        let data = [1, 2, 3];
        let span = VArray::Span(&data[..]);
        let owned: VArray<'_, i32> = VArray::Owned(vec![1, 2, 3]);
        assert_eq!(span.to_vec(), owned.to_vec());
        assert_eq!(span.iter().sum::<i32>(), 6);
        assert!(!span.is_single());
    }

    #[test]
    fn test_gvarray_convert_single_stays_single() {
        let g = GVArray::single(AttributeValue::Float(2.0), 5).convert(AttributeType::Float3);
        assert!(g.is_single());
        assert_eq!(g.len(), 5);
        assert_eq!(g.get(0), Some(AttributeValue::Float3(Vec3::splat(2.0))));
    }

    #[test]
    fn test_gvarray_convert_span() {
        let data = [1i32, 0, 5];
        let g = GVArray::from_slice(AttributeSlice::Int(&data));
        let f = g.convert(AttributeType::Bool);
        assert_eq!(f.data_type(), AttributeType::Bool);
        assert_eq!(f.get(1), Some(AttributeValue::Bool(false)));
        assert_eq!(f.get(2), Some(AttributeValue::Bool(true)));
    }

    #[test]
    fn test_into_typed() {
        let g = GVArray::from_data(AttributeData::Float(vec![1.0, 2.0]));
        let typed: VArray<'_, i32> = g.into_typed();
        assert_eq!(typed.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_from_typed() {
        let g: GVArray<'_> = VArray::single(true, 2).into();
        assert_eq!(g.data_type(), AttributeType::Bool);
    }
}
