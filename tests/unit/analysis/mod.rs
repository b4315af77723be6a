mod profile;
mod sharpness;
