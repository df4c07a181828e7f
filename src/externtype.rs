//! The extern-type hierarchy: function, global, table, and memory shapes
//! unified under `wasm_externtype_t`.
//!
//! The hierarchy is a closed, tag-discriminated union, not an open set of
//! virtual classes: `wasm_externtype_t` carries the payload for exactly one of
//! the four variants, and each variant handle is a `#[repr(transparent)]`
//! wrapper over the base. Up- and downcasts are therefore identity pointer
//! reinterpretations with no allocation; a downcast to the wrong variant
//! yields null.

use std::mem;

use crate::types::{
    Mutability, WASM_EXTERN_FUNC, WASM_EXTERN_GLOBAL, WASM_EXTERN_MEMORY, WASM_EXTERN_TABLE,
    wasm_externkind_t, wasm_limits_t, wasm_mutability_t, wasm_valtype_t,
};
use crate::vec::wasm_valtype_vec_t;

/// Discriminated base over the four extern-type variants.
#[derive(Clone)]
pub struct wasm_externtype_t {
    pub(crate) which: CExternType,
}

#[derive(Clone)]
pub(crate) enum CExternType {
    Func(CFuncType),
    Global(CGlobalType),
    Table(CTableType),
    Memory(CMemoryType),
}

#[derive(Clone)]
pub(crate) struct CFuncType {
    pub(crate) params: wasm_valtype_vec_t,
    pub(crate) results: wasm_valtype_vec_t,
}

#[derive(Clone)]
pub(crate) struct CGlobalType {
    pub(crate) content: wasm_valtype_t,
    pub(crate) mutability: Mutability,
}

#[derive(Clone)]
pub(crate) struct CTableType {
    pub(crate) element: wasm_valtype_t,
    pub(crate) limits: wasm_limits_t,
}

#[derive(Clone)]
pub(crate) struct CMemoryType {
    pub(crate) limits: wasm_limits_t,
}

impl wasm_externtype_t {
    pub(crate) fn kind(&self) -> wasm_externkind_t {
        match self.which {
            CExternType::Func(_) => WASM_EXTERN_FUNC,
            CExternType::Global(_) => WASM_EXTERN_GLOBAL,
            CExternType::Table(_) => WASM_EXTERN_TABLE,
            CExternType::Memory(_) => WASM_EXTERN_MEMORY,
        }
    }
}

/// Generate one variant handle: the transparent wrapper, its payload
/// accessor, and the checked casts from the base.
macro_rules! declare_externtype_variant {
    ($name:ident, $payload:ty, $variant:ident, $ty:ident, $as_ref:ident, $as_mut:ident) => {
        #[repr(transparent)]
        #[derive(Clone)]
        pub struct $name {
            pub(crate) ext: wasm_externtype_t,
        }

        impl $name {
            pub(crate) fn $ty(&self) -> &$payload {
                match &self.ext.which {
                    CExternType::$variant(payload) => payload,
                    // The discriminant set is closed; a variant handle with a
                    // foreign payload cannot be constructed.
                    _ => unreachable!(concat!(
                        stringify!($name),
                        " holding a mismatched payload"
                    )),
                }
            }
        }

        impl wasm_externtype_t {
            pub(crate) fn $as_ref(&self) -> Option<&$name> {
                if matches!(self.which, CExternType::$variant(_)) {
                    // SAFETY: the wrapper is repr(transparent) over the base,
                    // so the pointer reinterpretation preserves identity.
                    Some(unsafe { &*(self as *const wasm_externtype_t).cast::<$name>() })
                } else {
                    None
                }
            }

            pub(crate) fn $as_mut(&mut self) -> Option<&mut $name> {
                if matches!(self.which, CExternType::$variant(_)) {
                    // SAFETY: as above.
                    Some(unsafe { &mut *(self as *mut wasm_externtype_t).cast::<$name>() })
                } else {
                    None
                }
            }
        }
    };
}

declare_externtype_variant!(wasm_functype_t, CFuncType, Func, func, as_functype, as_functype_mut);
declare_externtype_variant!(
    wasm_globaltype_t,
    CGlobalType,
    Global,
    global,
    as_globaltype,
    as_globaltype_mut
);
declare_externtype_variant!(
    wasm_tabletype_t,
    CTableType,
    Table,
    table,
    as_tabletype,
    as_tabletype_mut
);
declare_externtype_variant!(
    wasm_memorytype_t,
    CMemoryType,
    Memory,
    memory,
    as_memorytype,
    as_memorytype_mut
);

// ---------------------------------------------------------------------------
// wasm_functype_t
// ---------------------------------------------------------------------------

/// Build a function type from two taken parameter/result vectors.
///
/// The caller's vector values are left empty.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_new(
    params: Option<&mut wasm_valtype_vec_t>,
    results: Option<&mut wasm_valtype_vec_t>,
) -> Box<wasm_functype_t> {
    Box::new(wasm_functype_t {
        ext: wasm_externtype_t {
            which: CExternType::Func(CFuncType {
                params: params.map(mem::take).unwrap_or_default(),
                results: results.map(mem::take).unwrap_or_default(),
            }),
        },
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_delete(_functype: Option<Box<wasm_functype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_copy(
    functype: Option<&wasm_functype_t>,
) -> Option<Box<wasm_functype_t>> {
    functype.map(|ft| Box::new(ft.clone()))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_params(
    functype: Option<&wasm_functype_t>,
) -> Option<&wasm_valtype_vec_t> {
    functype.map(|ft| &ft.func().params)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_results(
    functype: Option<&wasm_functype_t>,
) -> Option<&wasm_valtype_vec_t> {
    functype.map(|ft| &ft.func().results)
}

// ---------------------------------------------------------------------------
// wasm_globaltype_t
// ---------------------------------------------------------------------------

/// Build a global type from a taken content type and a mutability.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_new(
    content: Option<Box<wasm_valtype_t>>,
    mutability: wasm_mutability_t,
) -> Option<Box<wasm_globaltype_t>> {
    let content = content?;
    Some(Box::new(wasm_globaltype_t {
        ext: wasm_externtype_t {
            which: CExternType::Global(CGlobalType {
                content: *content,
                mutability: Mutability::from_raw(mutability),
            }),
        },
    }))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_delete(_globaltype: Option<Box<wasm_globaltype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_copy(
    globaltype: Option<&wasm_globaltype_t>,
) -> Option<Box<wasm_globaltype_t>> {
    globaltype.map(|gt| Box::new(gt.clone()))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_content(
    globaltype: Option<&wasm_globaltype_t>,
) -> Option<&wasm_valtype_t> {
    globaltype.map(|gt| &gt.global().content)
}

/// Mutability of the given global type; `WASM_CONST` when null.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_mutability(
    globaltype: Option<&wasm_globaltype_t>,
) -> wasm_mutability_t {
    globaltype.map_or(crate::types::WASM_CONST, |gt| {
        gt.global().mutability as wasm_mutability_t
    })
}

// ---------------------------------------------------------------------------
// wasm_tabletype_t
// ---------------------------------------------------------------------------

/// Build a table type from a taken element type and borrowed limits.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_new(
    element: Option<Box<wasm_valtype_t>>,
    limits: Option<&wasm_limits_t>,
) -> Option<Box<wasm_tabletype_t>> {
    let element = element?;
    let limits = limits?;
    Some(Box::new(wasm_tabletype_t {
        ext: wasm_externtype_t {
            which: CExternType::Table(CTableType {
                element: *element,
                limits: *limits,
            }),
        },
    }))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_delete(_tabletype: Option<Box<wasm_tabletype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_copy(
    tabletype: Option<&wasm_tabletype_t>,
) -> Option<Box<wasm_tabletype_t>> {
    tabletype.map(|tt| Box::new(tt.clone()))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_element(
    tabletype: Option<&wasm_tabletype_t>,
) -> Option<&wasm_valtype_t> {
    tabletype.map(|tt| &tt.table().element)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_limits(
    tabletype: Option<&wasm_tabletype_t>,
) -> Option<&wasm_limits_t> {
    tabletype.map(|tt| &tt.table().limits)
}

// ---------------------------------------------------------------------------
// wasm_memorytype_t
// ---------------------------------------------------------------------------

/// Build a memory type from borrowed limits.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_memorytype_new(
    limits: Option<&wasm_limits_t>,
) -> Option<Box<wasm_memorytype_t>> {
    let limits = limits?;
    Some(Box::new(wasm_memorytype_t {
        ext: wasm_externtype_t {
            which: CExternType::Memory(CMemoryType { limits: *limits }),
        },
    }))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_memorytype_delete(_memorytype: Option<Box<wasm_memorytype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_memorytype_copy(
    memorytype: Option<&wasm_memorytype_t>,
) -> Option<Box<wasm_memorytype_t>> {
    memorytype.map(|mt| Box::new(mt.clone()))
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_memorytype_limits(
    memorytype: Option<&wasm_memorytype_t>,
) -> Option<&wasm_limits_t> {
    memorytype.map(|mt| &mt.memory().limits)
}

// ---------------------------------------------------------------------------
// wasm_externtype_t
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_delete(_externtype: Option<Box<wasm_externtype_t>>) {}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_copy(
    externtype: Option<&wasm_externtype_t>,
) -> Option<Box<wasm_externtype_t>> {
    externtype.map(|et| Box::new(et.clone()))
}

/// Kind of the given extern type; `WASM_EXTERN_FUNC` when null.
#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_kind(
    externtype: Option<&wasm_externtype_t>,
) -> wasm_externkind_t {
    externtype.map_or(WASM_EXTERN_FUNC, wasm_externtype_t::kind)
}

// Upcasts: every variant handle is usable as the base without adjustment.

#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_as_externtype(
    functype: Option<&mut wasm_functype_t>,
) -> Option<&mut wasm_externtype_t> {
    functype.map(|ft| &mut ft.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_as_externtype(
    globaltype: Option<&mut wasm_globaltype_t>,
) -> Option<&mut wasm_externtype_t> {
    globaltype.map(|gt| &mut gt.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_as_externtype(
    tabletype: Option<&mut wasm_tabletype_t>,
) -> Option<&mut wasm_externtype_t> {
    tabletype.map(|tt| &mut tt.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_memorytype_as_externtype(
    memorytype: Option<&mut wasm_memorytype_t>,
) -> Option<&mut wasm_externtype_t> {
    memorytype.map(|mt| &mut mt.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_functype_as_externtype_const(
    functype: Option<&wasm_functype_t>,
) -> Option<&wasm_externtype_t> {
    functype.map(|ft| &ft.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_globaltype_as_externtype_const(
    globaltype: Option<&wasm_globaltype_t>,
) -> Option<&wasm_externtype_t> {
    globaltype.map(|gt| &gt.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_tabletype_as_externtype_const(
    tabletype: Option<&wasm_tabletype_t>,
) -> Option<&wasm_externtype_t> {
    tabletype.map(|tt| &tt.ext)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_memorytype_as_externtype_const(
    memorytype: Option<&wasm_memorytype_t>,
) -> Option<&wasm_externtype_t> {
    memorytype.map(|mt| &mt.ext)
}

// Downcasts: identity when the kind matches, null otherwise.

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_functype(
    externtype: Option<&mut wasm_externtype_t>,
) -> Option<&mut wasm_functype_t> {
    externtype.and_then(wasm_externtype_t::as_functype_mut)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_globaltype(
    externtype: Option<&mut wasm_externtype_t>,
) -> Option<&mut wasm_globaltype_t> {
    externtype.and_then(wasm_externtype_t::as_globaltype_mut)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_tabletype(
    externtype: Option<&mut wasm_externtype_t>,
) -> Option<&mut wasm_tabletype_t> {
    externtype.and_then(wasm_externtype_t::as_tabletype_mut)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_memorytype(
    externtype: Option<&mut wasm_externtype_t>,
) -> Option<&mut wasm_memorytype_t> {
    externtype.and_then(wasm_externtype_t::as_memorytype_mut)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_functype_const(
    externtype: Option<&wasm_externtype_t>,
) -> Option<&wasm_functype_t> {
    externtype.and_then(wasm_externtype_t::as_functype)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_globaltype_const(
    externtype: Option<&wasm_externtype_t>,
) -> Option<&wasm_globaltype_t> {
    externtype.and_then(wasm_externtype_t::as_globaltype)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_tabletype_const(
    externtype: Option<&wasm_externtype_t>,
) -> Option<&wasm_tabletype_t> {
    externtype.and_then(wasm_externtype_t::as_tabletype)
}

#[unsafe(no_mangle)]
pub extern "C" fn wasm_externtype_as_memorytype_const(
    externtype: Option<&wasm_externtype_t>,
) -> Option<&wasm_memorytype_t> {
    externtype.and_then(wasm_externtype_t::as_memorytype)
}
