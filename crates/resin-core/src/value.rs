//! Typed attribute values.
//!
//! [`AttributeValue`] holds a single element of any attribute type and
//! [`AttributeType`] names the type. The [`AttributeScalar`] trait links the
//! Rust element types (`bool`, `i32`, `f32`, `Vec2`, `Vec3`, `Vec4`) to their
//! runtime tags so columns can be accessed generically.
//!
//! # Example
//!
//! ```
//! use rhizome_resin_core::{AttributeScalar, AttributeType, AttributeValue};
//! use glam::Vec3;
//!
//! let v = AttributeValue::Float3(Vec3::new(1.0, 2.0, 3.0));
//! assert_eq!(v.data_type(), AttributeType::Float3);
//! assert_eq!(v.get::<Vec3>().unwrap(), Vec3::new(1.0, 2.0, 3.0));
//! assert_eq!(<f32 as AttributeScalar>::TYPE, AttributeType::Float);
//! ```

use glam::{Vec2, Vec3, Vec4};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::store::{AttributeData, AttributeSlice};
use crate::varray::{GVArray, VArray};

/// Data type of an attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeType {
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// 2D vector.
    Float2,
    /// 3D vector.
    Float3,
    /// RGBA color.
    Color,
}

impl AttributeType {
    /// All attribute types.
    pub const ALL: [AttributeType; 6] = [
        AttributeType::Bool,
        AttributeType::Int,
        AttributeType::Float,
        AttributeType::Float2,
        AttributeType::Float3,
        AttributeType::Color,
    ];
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::Int => write!(f, "int"),
            AttributeType::Float => write!(f, "float"),
            AttributeType::Float2 => write!(f, "float2"),
            AttributeType::Float3 => write!(f, "float3"),
            AttributeType::Color => write!(f, "color"),
        }
    }
}

/// A single attribute element of any type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeValue {
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit float
    Float(f32),
    /// 2D vector
    Float2(Vec2),
    /// 3D vector
    Float3(Vec3),
    /// RGBA color
    Color(Vec4),
}

impl AttributeValue {
    /// Returns the type of this value.
    pub fn data_type(&self) -> AttributeType {
        match self {
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::Float2(_) => AttributeType::Float2,
            AttributeValue::Float3(_) => AttributeType::Float3,
            AttributeValue::Color(_) => AttributeType::Color,
        }
    }

    /// The canonical zero value of a type.
    pub fn zero(data_type: AttributeType) -> Self {
        match data_type {
            AttributeType::Bool => AttributeValue::Bool(false),
            AttributeType::Int => AttributeValue::Int(0),
            AttributeType::Float => AttributeValue::Float(0.0),
            AttributeType::Float2 => AttributeValue::Float2(Vec2::ZERO),
            AttributeType::Float3 => AttributeValue::Float3(Vec3::ZERO),
            AttributeType::Color => AttributeValue::Color(Vec4::ZERO),
        }
    }

    /// Extracts the value as `T` without conversion.
    pub fn get<T: AttributeScalar>(self) -> Result<T, TypeError> {
        T::from_value(self).ok_or_else(|| TypeError::expected(T::TYPE, self.data_type()))
    }
}

/// Rust element type of an attribute column.
///
/// Implemented for `bool`, `i32`, `f32`, [`Vec2`], [`Vec3`] and [`Vec4`] (color).
pub trait AttributeScalar: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag of this type.
    const TYPE: AttributeType;

    /// Wraps the value.
    fn into_value(self) -> AttributeValue;

    /// Unwraps a value of exactly this type.
    fn from_value(value: AttributeValue) -> Option<Self>;

    /// Borrows a slice of this type.
    fn from_slice(slice: AttributeSlice<'_>) -> Option<&[Self]>;

    /// Takes ownership of a column of this type.
    fn from_data(data: AttributeData) -> Option<Vec<Self>>;

    /// Wraps an owned column.
    fn into_data(values: Vec<Self>) -> AttributeData;

    /// Erases the element type of a column view.
    fn wrap(array: VArray<'_, Self>) -> GVArray<'_>;

    /// Recovers a typed view, or returns the input if the type differs.
    fn unwrap(array: GVArray<'_>) -> Result<VArray<'_, Self>, GVArray<'_>>;
}

macro_rules! impl_attribute_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AttributeScalar for $ty {
                const TYPE: AttributeType = AttributeType::$variant;

                fn into_value(self) -> AttributeValue {
                    AttributeValue::$variant(self)
                }

                fn from_value(value: AttributeValue) -> Option<Self> {
                    match value {
                        AttributeValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn from_slice(slice: AttributeSlice<'_>) -> Option<&[Self]> {
                    match slice {
                        AttributeSlice::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn from_data(data: AttributeData) -> Option<Vec<Self>> {
                    match data {
                        AttributeData::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn into_data(values: Vec<Self>) -> AttributeData {
                    AttributeData::$variant(values)
                }

                fn wrap(array: VArray<'_, Self>) -> GVArray<'_> {
                    GVArray::$variant(array)
                }

                fn unwrap(array: GVArray<'_>) -> Result<VArray<'_, Self>, GVArray<'_>> {
                    match array {
                        GVArray::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }

            impl From<$ty> for AttributeValue {
                fn from(v: $ty) -> Self {
                    AttributeValue::$variant(v)
                }
            }
        )*
    };
}

impl_attribute_scalar! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    Vec2 => Float2,
    Vec3 => Float3,
    Vec4 => Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_match_type() {
        for ty in AttributeType::ALL {
            assert_eq!(AttributeValue::zero(ty).data_type(), ty);
        }
    }

    #[test]
    fn test_get_wrong_type() {
        let err = AttributeValue::Int(3).get::<f32>().unwrap_err();
        assert_eq!(err.expected, AttributeType::Float);
        assert_eq!(err.got, AttributeType::Int);
    }

    #[test]
    fn test_from_impls() {
        let v: AttributeValue = 1.5f32.into();
        assert_eq!(v, AttributeValue::Float(1.5));
        let v: AttributeValue = Vec4::ONE.into();
        assert_eq!(v.data_type(), AttributeType::Color);
    }
}
