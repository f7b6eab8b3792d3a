//! The closed set of primitive kinds the codec moves.
//!
//! Every scalar the wire knows about implements [`Scalar`], a sealed trait
//! that pins down its kind, wire size, native-order encoding, and
//! byte-swapped decoding. All higher-level operations (slices, vectors)
//! dispatch through it, so adding a kind means one impl here and nothing
//! anywhere else.

use bytes::{BufMut, BytesMut};

/// Primitive kinds understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prim {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Narrow complex: two f32 (re, im).
    C32,
    /// Standard complex: two f64 (re, im).
    C64,
}

impl Prim {
    /// Encoded size of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            Prim::Bool | Prim::I8 | Prim::U8 => 1,
            Prim::I16 | Prim::U16 => 2,
            Prim::I32 | Prim::U32 | Prim::F32 => 4,
            Prim::I64 | Prim::U64 | Prim::F64 | Prim::C32 => 8,
            Prim::C64 => 16,
        }
    }

    /// Short wire-level name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Prim::Bool => "bool",
            Prim::I8 => "i8",
            Prim::U8 => "u8",
            Prim::I16 => "i16",
            Prim::U16 => "u16",
            Prim::I32 => "i32",
            Prim::U32 => "u32",
            Prim::I64 => "i64",
            Prim::U64 => "u64",
            Prim::F32 => "f32",
            Prim::F64 => "f64",
            Prim::C32 => "c32",
            Prim::C64 => "c64",
        }
    }
}

/// Narrow complex number: two `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

impl Complex32 {
    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// Standard complex number: two `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex64 {
    pub re: f64,
    pub im: f64,
}

impl Complex64 {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive value with a fixed wire encoding.
///
/// `put` appends the value in the local machine's native byte order;
/// `get` reconstructs it from `src[..SIZE]`, swapping bytes when the
/// producer's order differs from ours.
pub trait Scalar: sealed::Sealed + Copy + 'static {
    const KIND: Prim;
    const SIZE: usize = Self::KIND.size();

    fn put(self, dst: &mut BytesMut);
    fn get(src: &[u8], swap: bool) -> Self;
}

macro_rules! int_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const KIND: Prim = Prim::$kind;

            fn put(self, dst: &mut BytesMut) {
                dst.put_slice(&self.to_ne_bytes());
            }

            fn get(src: &[u8], swap: bool) -> Self {
                let value = <$ty>::from_ne_bytes(src[..Self::SIZE].try_into().unwrap());
                if swap {
                    value.swap_bytes()
                } else {
                    value
                }
            }
        }
    )*};
}

int_scalar! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const KIND: Prim = Prim::Bool;

    fn put(self, dst: &mut BytesMut) {
        dst.put_u8(self as u8);
    }

    fn get(src: &[u8], _swap: bool) -> Self {
        src[0] != 0
    }
}

impl sealed::Sealed for f32 {}

impl Scalar for f32 {
    const KIND: Prim = Prim::F32;

    fn put(self, dst: &mut BytesMut) {
        dst.put_slice(&self.to_bits().to_ne_bytes());
    }

    fn get(src: &[u8], swap: bool) -> Self {
        f32::from_bits(u32::get(src, swap))
    }
}

impl sealed::Sealed for f64 {}

impl Scalar for f64 {
    const KIND: Prim = Prim::F64;

    fn put(self, dst: &mut BytesMut) {
        dst.put_slice(&self.to_bits().to_ne_bytes());
    }

    fn get(src: &[u8], swap: bool) -> Self {
        f64::from_bits(u64::get(src, swap))
    }
}

impl sealed::Sealed for Complex32 {}

impl Scalar for Complex32 {
    const KIND: Prim = Prim::C32;

    fn put(self, dst: &mut BytesMut) {
        self.re.put(dst);
        self.im.put(dst);
    }

    fn get(src: &[u8], swap: bool) -> Self {
        Self {
            re: f32::get(&src[..4], swap),
            im: f32::get(&src[4..8], swap),
        }
    }
}

impl sealed::Sealed for Complex64 {}

impl Scalar for Complex64 {
    const KIND: Prim = Prim::C64;

    fn put(self, dst: &mut BytesMut) {
        self.re.put(dst);
        self.im.put(dst);
    }

    fn get(src: &[u8], swap: bool) -> Self {
        Self {
            re: f64::get(&src[..8], swap),
            im: f64::get(&src[8..16], swap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Scalar + PartialEq + std::fmt::Debug>(value: T) {
        let mut buf = BytesMut::new();
        value.put(&mut buf);
        assert_eq!(buf.len(), T::SIZE);
        assert_eq!(T::get(&buf, false), value);
    }

    #[test]
    fn scalar_roundtrips_native_order() {
        roundtrip(true);
        roundtrip(false);
        roundtrip(-7i8);
        roundtrip(0xA5u8);
        roundtrip(-30_000i16);
        roundtrip(60_000u16);
        roundtrip(-2_000_000_000i32);
        roundtrip(4_000_000_000u32);
        roundtrip(i64::MIN);
        roundtrip(u64::MAX);
        roundtrip(1.5f32);
        roundtrip(-2.25f64);
        roundtrip(Complex32::new(1.0, -1.0));
        roundtrip(Complex64::new(3.5, 0.125));
    }

    #[test]
    fn swapped_get_reverses_byte_order() {
        let mut buf = BytesMut::new();
        0x0102_0304u32.put(&mut buf);

        let swapped = u32::get(&buf, true);
        assert_eq!(swapped, 0x0403_0201);
    }

    #[test]
    fn swapped_float_preserves_value() {
        let value = -123.456f64;
        let mut buf = BytesMut::new();
        buf.put_slice(&value.to_bits().swap_bytes().to_ne_bytes());

        assert_eq!(f64::get(&buf, true), value);
    }

    #[test]
    fn complex_components_swap_independently() {
        let value = Complex32::new(1.5, -8.0);
        let mut buf = BytesMut::new();
        buf.put_slice(&value.re.to_bits().swap_bytes().to_ne_bytes());
        buf.put_slice(&value.im.to_bits().swap_bytes().to_ne_bytes());

        assert_eq!(Complex32::get(&buf, true), value);
    }

    #[test]
    fn prim_sizes_match_scalar_sizes() {
        assert_eq!(<bool as Scalar>::SIZE, 1);
        assert_eq!(<u16 as Scalar>::SIZE, 2);
        assert_eq!(<f32 as Scalar>::SIZE, 4);
        assert_eq!(<f64 as Scalar>::SIZE, 8);
        assert_eq!(<Complex32 as Scalar>::SIZE, 8);
        assert_eq!(<Complex64 as Scalar>::SIZE, 16);
    }
}
