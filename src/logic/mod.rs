//! Domain core: feature layouts, model registry, clinical rules, advice

pub mod advice;
pub mod clinical;
pub mod layout;
pub mod registry;
