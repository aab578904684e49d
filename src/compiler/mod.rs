pub mod cython;
pub mod toolchain;

pub use cython::CythonToolchain;
pub use toolchain::Toolchain;

#[cfg(test)]
pub(crate) mod testing;
