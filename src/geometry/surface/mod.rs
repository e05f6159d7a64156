mod sphere;

pub use sphere::Sphere;
