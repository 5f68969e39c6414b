mod make_box;
mod make_cylinder;
mod make_solution;
mod make_sphere;

pub use make_box::MakeBox;
pub use make_cylinder::MakeCylinder;
pub use make_solution::MakeSolution;
pub use make_sphere::MakeSphere;
