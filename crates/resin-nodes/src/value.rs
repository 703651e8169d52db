//! Socket value types.

use std::fmt;

use glam::{Vec3, Vec4};
use rhizome_resin_core::{AttributeType, AttributeValue, conversions};
use rhizome_resin_geometry::GeometrySet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of value a socket carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SocketType {
    /// Boolean.
    Bool,
    /// 32-bit integer.
    Int,
    /// 32-bit float.
    Float,
    /// 3D vector.
    Vector,
    /// RGBA color.
    Color,
    /// Text, also used to name attributes.
    String,
    /// A [`GeometrySet`].
    Geometry,
}

impl SocketType {
    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SocketType::Bool => "bool",
            SocketType::Int => "int",
            SocketType::Float => "float",
            SocketType::Vector => "vector",
            SocketType::Color => "color",
            SocketType::String => "string",
            SocketType::Geometry => "geometry",
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value held by a socket.
#[derive(Debug, Clone)]
pub enum SocketValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i32),
    /// Float value.
    Float(f32),
    /// Vector value.
    Vector(Vec3),
    /// Color value.
    Color(Vec4),
    /// String value.
    String(String),
    /// Geometry value.
    Geometry(GeometrySet),
}

impl SocketValue {
    /// Returns the kind of this value.
    pub fn socket_type(&self) -> SocketType {
        match self {
            SocketValue::Bool(_) => SocketType::Bool,
            SocketValue::Int(_) => SocketType::Int,
            SocketValue::Float(_) => SocketType::Float,
            SocketValue::Vector(_) => SocketType::Vector,
            SocketValue::Color(_) => SocketType::Color,
            SocketValue::String(_) => SocketType::String,
            SocketValue::Geometry(_) => SocketType::Geometry,
        }
    }

    /// The value an unconnected socket of this kind has without a declared default.
    pub fn default_for(socket_type: SocketType) -> Self {
        match socket_type {
            SocketType::Bool => SocketValue::Bool(false),
            SocketType::Int => SocketValue::Int(0),
            SocketType::Float => SocketValue::Float(0.0),
            SocketType::Vector => SocketValue::Vector(Vec3::ZERO),
            SocketType::Color => SocketValue::Color(Vec4::ZERO),
            SocketType::String => SocketValue::String(String::new()),
            SocketType::Geometry => SocketValue::Geometry(GeometrySet::new()),
        }
    }

    /// Converts between value kinds the way links between sockets do.
    ///
    /// Numbers, vectors and colors follow the implicit attribute conversions.
    /// Strings and geometry only convert to themselves.
    pub fn convert(self, to: SocketType) -> Option<SocketValue> {
        if self.socket_type() == to {
            return Some(self);
        }
        let value = self.to_attribute_value()?;
        let target = match to {
            SocketType::Bool => AttributeType::Bool,
            SocketType::Int => AttributeType::Int,
            SocketType::Float => AttributeType::Float,
            SocketType::Vector => AttributeType::Float3,
            SocketType::Color => AttributeType::Color,
            SocketType::String | SocketType::Geometry => return None,
        };
        match conversions::convert(value, target) {
            AttributeValue::Bool(v) => Some(SocketValue::Bool(v)),
            AttributeValue::Int(v) => Some(SocketValue::Int(v)),
            AttributeValue::Float(v) => Some(SocketValue::Float(v)),
            AttributeValue::Float3(v) => Some(SocketValue::Vector(v)),
            AttributeValue::Color(v) => Some(SocketValue::Color(v)),
            AttributeValue::Float2(_) => None,
        }
    }

    /// The single attribute value this socket value stands for, if any.
    pub fn to_attribute_value(&self) -> Option<AttributeValue> {
        match self {
            SocketValue::Bool(v) => Some(AttributeValue::Bool(*v)),
            SocketValue::Int(v) => Some(AttributeValue::Int(*v)),
            SocketValue::Float(v) => Some(AttributeValue::Float(*v)),
            SocketValue::Vector(v) => Some(AttributeValue::Float3(*v)),
            SocketValue::Color(v) => Some(AttributeValue::Color(*v)),
            SocketValue::String(_) | SocketValue::Geometry(_) => None,
        }
    }
}

/// A Rust type that maps to one [`SocketType`].
pub trait SocketData: Sized + Default + 'static {
    /// The socket kind carrying this type.
    const SOCKET_TYPE: SocketType;

    /// Unwraps a value of the matching kind, handing back anything else.
    fn from_socket_value(value: SocketValue) -> Result<Self, SocketValue>;

    /// Copies the value out of a socket value of the matching kind.
    fn peek(value: &SocketValue) -> Option<Self>;

    /// Wraps the value.
    fn into_socket_value(self) -> SocketValue;
}

macro_rules! impl_socket_data {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SocketData for $ty {
                const SOCKET_TYPE: SocketType = SocketType::$variant;

                fn from_socket_value(value: SocketValue) -> Result<Self, SocketValue> {
                    match value {
                        SocketValue::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }

                fn peek(value: &SocketValue) -> Option<Self> {
                    match value {
                        SocketValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                fn into_socket_value(self) -> SocketValue {
                    SocketValue::$variant(self)
                }
            }

            impl From<$ty> for SocketValue {
                fn from(v: $ty) -> Self {
                    SocketValue::$variant(v)
                }
            }
        )*
    };
}

impl_socket_data! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    Vec3 => Vector,
    Vec4 => Color,
    String => String,
    GeometrySet => Geometry,
}

impl From<&str> for SocketValue {
    fn from(v: &str) -> Self {
        SocketValue::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_data_roundtrip() {
        let value = 3i32.into_socket_value();
        assert_eq!(value.socket_type(), SocketType::Int);
        assert_eq!(i32::peek(&value), Some(3));
        assert!(f32::peek(&value).is_none());
        assert!(matches!(f32::from_socket_value(value), Err(SocketValue::Int(3))));
    }

    #[test]
    fn test_convert() {
        let value = SocketValue::Float(2.5).convert(SocketType::Int);
        assert!(matches!(value, Some(SocketValue::Int(2))));

        let value = SocketValue::Float(0.5).convert(SocketType::Vector);
        assert!(matches!(value, Some(SocketValue::Vector(v)) if v == Vec3::splat(0.5)));

        assert!(SocketValue::Int(1).convert(SocketType::String).is_none());
        assert!(SocketValue::from("a").convert(SocketType::Float).is_none());
        assert!(matches!(
            SocketValue::from("a").convert(SocketType::String),
            Some(SocketValue::String(s)) if s == "a"
        ));
    }

    #[test]
    fn test_default_for() {
        for ty in [
            SocketType::Bool,
            SocketType::Int,
            SocketType::Float,
            SocketType::Vector,
            SocketType::Color,
            SocketType::String,
            SocketType::Geometry,
        ] {
            assert_eq!(SocketValue::default_for(ty).socket_type(), ty);
        }
    }
}
