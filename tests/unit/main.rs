//! Unit tests mirroring the `src/` module layout

mod algorithm;
mod analysis;
mod io;
