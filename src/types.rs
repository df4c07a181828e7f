//! Kind enumerations, limits, and the leaf `wasm_valtype_t` descriptor.

/// Raw value-kind discriminant crossing the boundary.
pub type wasm_valkind_t = u8;

/// Raw mutability discriminant crossing the boundary.
pub type wasm_mutability_t = u8;

/// Raw extern-kind discriminant crossing the boundary.
pub type wasm_externkind_t = u8;

pub const WASM_I32: wasm_valkind_t = 0;
pub const WASM_I64: wasm_valkind_t = 1;
pub const WASM_F32: wasm_valkind_t = 2;
pub const WASM_F64: wasm_valkind_t = 3;
pub const WASM_ANYREF: wasm_valkind_t = 128;
pub const WASM_FUNCREF: wasm_valkind_t = 129;

pub const WASM_CONST: wasm_mutability_t = 0;
pub const WASM_VAR: wasm_mutability_t = 1;

pub const WASM_EXTERN_FUNC: wasm_externkind_t = 0;
pub const WASM_EXTERN_GLOBAL: wasm_externkind_t = 1;
pub const WASM_EXTERN_TABLE: wasm_externkind_t = 2;
pub const WASM_EXTERN_MEMORY: wasm_externkind_t = 3;

/// Closed set of WebAssembly value kinds.
///
/// Discriminants are the boundary encoding.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValKind {
    I32 = 0,
    I64 = 1,
    F32 = 2,
    F64 = 3,
    AnyRef = 128,
    FuncRef = 129,
}

impl ValKind {
    /// Decode a raw kind received from the boundary.
    ///
    /// A kind outside the closed set is an integration error on the caller's
    /// side and is not recoverable.
    pub(crate) fn from_raw(kind: wasm_valkind_t) -> ValKind {
        match kind {
            WASM_I32 => ValKind::I32,
            WASM_I64 => ValKind::I64,
            WASM_F32 => ValKind::F32,
            WASM_F64 => ValKind::F64,
            WASM_ANYREF => ValKind::AnyRef,
            WASM_FUNCREF => ValKind::FuncRef,
            _ => panic!("invalid wasm_valkind_t: {kind}"),
        }
    }
}

/// Whether a global binding is read-only or assignable.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutability {
    Const = 0,
    Var = 1,
}

impl Mutability {
    /// Decode a raw mutability received from the boundary.
    pub(crate) fn from_raw(mutability: wasm_mutability_t) -> Mutability {
        match mutability {
            WASM_CONST => Mutability::Const,
            WASM_VAR => Mutability::Var,
            _ => panic!("invalid wasm_mutability_t: {mutability}"),
        }
    }
}

/// Inclusive `{min, max}` bound pair constraining table and memory sizes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct wasm_limits_t {
    pub min: u32,
    pub max: u32,
}

/// A single value kind wrapped as a first-class type descriptor.
#[derive(Debug, Clone)]
pub struct wasm_valtype_t {
    pub(crate) kind: ValKind,
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_valtype_new(kind: wasm_valkind_t) -> Box<wasm_valtype_t> {
    Box::new(wasm_valtype_t {
        kind: ValKind::from_raw(kind),
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_valtype_delete(_valtype: Option<Box<wasm_valtype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_valtype_copy(
    valtype: Option<&wasm_valtype_t>,
) -> Option<Box<wasm_valtype_t>> {
    valtype.map(|vt| Box::new(vt.clone()))
}

/// Kind of the given value type; `WASM_I32` when `valtype` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_valtype_kind(valtype: Option<&wasm_valtype_t>) -> wasm_valkind_t {
    valtype.map_or(WASM_I32, |vt| vt.kind as wasm_valkind_t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valtype_kind_round_trip() {
        for kind in [WASM_I32, WASM_I64, WASM_F32, WASM_F64, WASM_ANYREF, WASM_FUNCREF] {
            let vt = wasm_valtype_new(kind);
            assert_eq!(wasm_valtype_kind(Some(&vt)), kind);
        }
    }

    #[test]
    fn valtype_kind_null_defaults_to_i32() {
        assert_eq!(wasm_valtype_kind(None), WASM_I32);
    }

    #[test]
    fn valtype_copy_is_independent() {
        let vt = wasm_valtype_new(WASM_F64);
        let dup = wasm_valtype_copy(Some(&vt)).unwrap();
        wasm_valtype_delete(Some(vt));
        assert_eq!(wasm_valtype_kind(Some(&dup)), WASM_F64);
    }

    #[test]
    fn valtype_copy_null_is_null() {
        assert!(wasm_valtype_copy(None).is_none());
    }

    #[test]
    #[should_panic(expected = "invalid wasm_valkind_t")]
    fn valkind_outside_closed_set_is_fatal() {
        ValKind::from_raw(42);
    }
}
