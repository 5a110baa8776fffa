pub mod error;
pub mod model;

pub use error::{ParseFailure, Result, SkelError};
pub use model::{
    ClassInfo, FunctionInfo, ImportInfo, MethodKind, ModuleInfo, ParamInfo, ParamKind, VarInfo,
    upsert_var,
};
