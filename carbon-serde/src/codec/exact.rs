//! Pre-flight walk over a value that rejects shapes JSON cannot store exactly:
//! non-finite floats (written as `null`) and `Some` around anything that is
//! itself written as `null`.

use serde::Serialize;
use serde::ser::{self, Serializer};
use std::fmt;

#[derive(Debug)]
pub(super) struct Inexact(String);

impl fmt::Display for Inexact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Inexact {}

impl ser::Error for Inexact {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Inexact(msg.to_string())
    }
}

pub(super) fn check<T: Serialize + ?Sized>(value: &T) -> Result<(), Inexact> {
    value.serialize(ExactCheck::default())
}

#[derive(Clone, Copy, Debug, Default)]
struct ExactCheck {
    inside_some: bool,
}

impl ExactCheck {
    fn null(self, what: &str) -> Result<(), Inexact> {
        if self.inside_some {
            Err(Inexact(format!("Some({}) would be read back as None", what)))
        } else {
            Ok(())
        }
    }

    fn float(v: f64) -> Result<(), Inexact> {
        if v.is_finite() {
            Ok(())
        } else {
            Err(Inexact(format!("non-finite float {} has no JSON form", v)))
        }
    }
}

impl Serializer for ExactCheck {
    type Ok = ();
    type Error = Inexact;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), Inexact> {
        Self::float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), Inexact> {
        Self::float(v)
    }

    fn serialize_char(self, _v: char) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), Inexact> {
        self.null("None")
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), Inexact> {
        value.serialize(ExactCheck { inside_some: true })
    }

    fn serialize_unit(self) -> Result<(), Inexact> {
        self.null("()")
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<(), Inexact> {
        self.null(name)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Inexact> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), Inexact> {
        check(value)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, Inexact> {
        Ok(Self::default())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, Inexact> {
        Ok(Self::default())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self, Inexact> {
        Ok(Self::default())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, Inexact> {
        Ok(Self::default())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, Inexact> {
        Ok(Self::default())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, Inexact> {
        Ok(Self::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, Inexact> {
        Ok(Self::default())
    }
}

impl ser::SerializeSeq for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}

impl ser::SerializeTuple for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}

// Keys are left to serde_json, which rejects anything it cannot turn into a string.
impl ser::SerializeMap for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, _key: &T) -> Result<(), Inexact> {
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}

impl ser::SerializeStruct for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for ExactCheck {
    type Ok = ();
    type Error = Inexact;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), Inexact> {
        check(value)
    }

    fn end(self) -> Result<(), Inexact> {
        Ok(())
    }
}
