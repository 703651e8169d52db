//! Implicit conversions between attribute types.
//!
//! Every pair of [`AttributeType`]s has a conversion. Scalars broadcast to
//! vectors, vectors reduce to their component average, colors reduce to
//! their luminance.

use glam::{Vec2, Vec3, Vec4};

use crate::value::{AttributeScalar, AttributeType, AttributeValue};

/// Rec. 709 luminance of the RGB channels.
fn rgb_to_grayscale(c: Vec4) -> f32 {
    0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z
}

fn gray(v: f32) -> Vec4 {
    Vec4::new(v, v, v, 1.0)
}

/// Converts a value to another attribute type.
pub fn convert(value: AttributeValue, to: AttributeType) -> AttributeValue {
    use AttributeValue as V;

    if value.data_type() == to {
        return value;
    }

    match value {
        V::Bool(b) => {
            let f = if b { 1.0 } else { 0.0 };
            match to {
                AttributeType::Bool => V::Bool(b),
                AttributeType::Int => V::Int(b as i32),
                AttributeType::Float => V::Float(f),
                AttributeType::Float2 => V::Float2(Vec2::splat(f)),
                AttributeType::Float3 => V::Float3(Vec3::splat(f)),
                AttributeType::Color => V::Color(gray(f)),
            }
        }
        V::Int(i) => {
            let f = i as f32;
            match to {
                AttributeType::Bool => V::Bool(i > 0),
                AttributeType::Int => V::Int(i),
                AttributeType::Float => V::Float(f),
                AttributeType::Float2 => V::Float2(Vec2::splat(f)),
                AttributeType::Float3 => V::Float3(Vec3::splat(f)),
                AttributeType::Color => V::Color(gray(f)),
            }
        }
        V::Float(f) => match to {
            AttributeType::Bool => V::Bool(f > 0.0),
            AttributeType::Int => V::Int(f as i32),
            AttributeType::Float => V::Float(f),
            AttributeType::Float2 => V::Float2(Vec2::splat(f)),
            AttributeType::Float3 => V::Float3(Vec3::splat(f)),
            AttributeType::Color => V::Color(gray(f)),
        },
        V::Float2(v) => {
            let avg = (v.x + v.y) / 2.0;
            match to {
                AttributeType::Bool => V::Bool(v != Vec2::ZERO),
                AttributeType::Int => V::Int(avg as i32),
                AttributeType::Float => V::Float(avg),
                AttributeType::Float2 => V::Float2(v),
                AttributeType::Float3 => V::Float3(v.extend(0.0)),
                AttributeType::Color => V::Color(Vec4::new(v.x, v.y, 0.0, 1.0)),
            }
        }
        V::Float3(v) => {
            let avg = (v.x + v.y + v.z) / 3.0;
            match to {
                AttributeType::Bool => V::Bool(v != Vec3::ZERO),
                AttributeType::Int => V::Int(avg as i32),
                AttributeType::Float => V::Float(avg),
                AttributeType::Float2 => V::Float2(v.truncate()),
                AttributeType::Float3 => V::Float3(v),
                AttributeType::Color => V::Color(v.extend(1.0)),
            }
        }
        V::Color(c) => {
            let luma = rgb_to_grayscale(c);
            match to {
                AttributeType::Bool => V::Bool(luma > 0.0),
                AttributeType::Int => V::Int(luma as i32),
                AttributeType::Float => V::Float(luma),
                AttributeType::Float2 => V::Float2(Vec2::new(c.x, c.y)),
                AttributeType::Float3 => V::Float3(c.truncate()),
                AttributeType::Color => V::Color(c),
            }
        }
    }
}

/// Converts a value to the Rust element type `T`.
pub fn convert_to<T: AttributeScalar>(value: AttributeValue) -> T {
    // `convert` always yields a value of the requested type.
    T::from_value(convert(value, T::TYPE)).unwrap_or_default()
}
