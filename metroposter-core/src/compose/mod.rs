pub(crate) mod crop;
pub(crate) mod layers;
pub(crate) mod scene;
