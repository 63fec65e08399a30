//! Integer newtypes whose accessors are generated by build.rs.
#![allow(non_upper_case_globals)]

use enumtab_codegen::Enumtab;

/// Errors reported by the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enumtab)]
pub struct Error(pub i32);

impl Error {
    /// User could not be found
    pub const NotFound: Self = Self(0);
    /// User already exists
    pub const AlreadyExists: Self = Self(1);
    /// Not sure what happened
    pub const NotSure: Self = Self(2);
    /// You didn't send a good request
    pub const BadRequestData: Self = Self(3);
    /// Works on my machine
    pub const WorksOnMyMachine: Self = Self(4);
}

/// The same errors, numbered from 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enumtab)]
pub struct Offset(pub i32);

impl Offset {
    /// User could not be found
    pub const NotFound: Self = Self(100);
    /// User already exists
    pub const AlreadyExists: Self = Self(101);
    /// Not sure what happened
    pub const NotSure: Self = Self(102);
    /// You didn't send a good request
    pub const BadRequestData: Self = Self(103);
    /// Works on my machine
    pub const WorksOnMyMachine: Offset = Offset(104);
}

/// Status codes with a hole at 102.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enumtab)]
pub struct Status(pub u16);

impl Status {
    /// Request accepted
    pub const Accepted: Self = Self(100);
    /// Request queued
    pub const Queued: Self = Self(101);
    /// Request running
    pub const Running: Self = Self(103);
    /// Request finished
    pub const Finished: Self = Self(104);
    /// Request failed
    /// and will not be retried
    pub const Failed: Self = Self(105);
}

/// Widely scattered values, looked up through a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enumtab)]
pub struct Sparse(pub i64);

impl Sparse {
    /// Far below zero
    pub const Abyss: Self = Self(-1_000);
    pub const MinusTen: Self = Self(-10);
    /// Nothing at all
    pub const Zero: Self = Self(0);
    pub const Two: Self = Self(2);
    pub const Four: Self = Self(4);
    pub const Eight: Self = Self(8);
    pub const Sixteen: Self = Self(16);
    pub const ThirtyTwo: Self = Self(32);
    pub const SixtyFour: Self = Self(64);
    pub const OneTwentyEight: Self = Self(128);
    /// One million
    pub const Million: Self = Self(1_000_000);
    /// As large as it gets
    pub const Max: Self = Self(9223372036854775807);
}

/// Log levels centered on zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enumtab)]
pub struct Level(pub i8);

impl Level {
    /// Fine-grained tracing
    pub const Trace: Self = Self(-2);
    /// Debugging output
    pub const Debug: Self = Self(-1);
    /// Normal operation
    pub const Info: Self = Self(0);
    /// Something looks off
    pub const Warn: Self = Self(1);
    /// Something failed
    pub const Error: Self = Self(2);
}

/// A type where two constants share a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enumtab)]
pub struct Shade(pub u8);

impl Shade {
    /// The first shade
    pub const Light: Self = Self(1);
    /// Declared later with the same value
    pub const Pale: Self = Self(1);
    /// The second shade
    pub const Dark: Self = Self(2);
}

include!(concat!(env!("OUT_DIR"), "/codes_enumtab.rs"));
