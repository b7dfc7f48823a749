pub const TOOL_ID: &str = "vtgen@0.1.0";

/// Macro invoked once per arity in the generated source.
pub const MACRO_NAME: &str = "impl_view_tuple";

/// Prefix of the generated placeholder type parameters (`V0`, `V1`, ...).
pub const PLACEHOLDER_PREFIX: &str = "V";

/// Name of the bound constant declared ahead of the bidirectional body.
pub const MAX_ELEMENTS_CONST: &str = "VIEW_TUPLE_MAX_ELEMENTS";

pub mod limits {
    pub const DEFAULT_MAX_ELEMENTS: usize = 128;
    pub const MAX_ELEMENTS: usize = 1024;
    pub const MAX_SOURCE_BYTES: usize = 8 * 1024 * 1024;

    pub fn max_elements() -> usize {
        match std::env::var("VTGEN_MAX_ELEMENTS") {
            Ok(v) => v
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .unwrap_or(MAX_ELEMENTS),
            Err(_) => MAX_ELEMENTS,
        }
    }

    pub fn max_source_bytes() -> usize {
        match std::env::var("VTGEN_MAX_SOURCE_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .unwrap_or(MAX_SOURCE_BYTES),
            Err(_) => MAX_SOURCE_BYTES,
        }
    }
}
