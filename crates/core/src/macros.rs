// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small declarative macros shared by the record and config types

/// `Display` for an enum whose variants each print as a fixed string.
///
/// Variants with fields are written `Variant(..)`.
///
/// ```ignore
/// crate::simple_display! {
///     RunState {
///         Running => "running",
///         Aborted => "aborted",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $str, )+
                })
            }
        }
    };
}

/// By-value setters, expanded inside an `impl` block.
///
/// Fields under `into` accept `impl Into<T>`, fields under `set` take `T`
/// as is, and fields under `option` are `Option<T>` filled with `Some`.
/// Groups must appear in that order.
///
/// ```ignore
/// impl ControllerConfig {
///     mj_core::setters! {
///         into { storage_root: PathBuf }
///         set { survive_restart: bool }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into {
            $( $into_field:ident : $into_ty:ty ),* $(,)?
        })?
        $(set {
            $( $set_field:ident : $set_ty:ty ),* $(,)?
        })?
        $(option {
            $( $opt_field:ident : $opt_ty:ty ),* $(,)?
        })?
    ) => {
        $($(
            pub fn $into_field(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into_field = v.into();
                self
            }
        )*)?

        $($(
            pub fn $set_field(mut self, v: $set_ty) -> Self {
                self.$set_field = v;
                self
            }
        )*)?

        $($(
            pub fn $opt_field(mut self, v: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(v.into());
                self
            }
        )*)?
    };
}
