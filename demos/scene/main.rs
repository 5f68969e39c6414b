//! Scene demo: builds a small assembly, prints its mass properties and
//! round-trips it through a project file.
//!
//! Usage:
//! ```text
//! cargo run --example scene                      # writes to the temp dir
//! cargo run --example scene -- out/frame.json    # explicit path
//! ```

use std::path::PathBuf;

use thesolution::geometry::SolutionCoordinate;
use thesolution::operations::creation::{MakeBox, MakeCylinder, MakeSolution};
use thesolution::operations::query::{AbsoluteCoordinate, TotalMass, TotalVolume, Validate};
use thesolution::project::{ProjectManager, ProjectMetadata};
use thesolution::registry::SolutionRegistry;
use thesolution::scene::{Material, SolutionType};
use thesolution::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for thesolution.
    // Override with RUST_LOG env var (e.g. RUST_LOG=thesolution=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("scene=info".parse().unwrap_or_default())
        .add_directive("thesolution=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let path = std::env::args()
        .nth(1)
        .map_or_else(|| std::env::temp_dir().join("thesolution_demo.json"), PathBuf::from);

    let mut registry = SolutionRegistry::with_defaults();
    let Some(module) = registry.primary_3d_mut() else {
        return Ok(());
    };
    let scene = &mut module.scene;

    let frame = MakeSolution::new("Frame", SolutionType::Assembly)
        .at(SolutionCoordinate::from_position(0.0, 0.0, 100.0))
        .execute(scene)?;
    let base = MakeBox::new(SolutionCoordinate::default(), 200.0, 10.0, 200.0)
        .named("Base plate")
        .with_material(Material::steel())
        .execute(scene)?;
    let post = MakeCylinder::new(SolutionCoordinate::from_position(0.0, 10.0, 0.0), 8.0, 150.0)
        .named("Post")
        .with_material(Material::aluminum())
        .execute(scene)?;
    scene.add_child(frame, base)?;
    scene.add_child(base, post)?;

    println!("post at {}", AbsoluteCoordinate::new(post).execute(scene)?);
    println!("volume {:.1}", TotalVolume::new(frame).execute(scene)?);
    println!("mass   {:.1}", TotalMass::new(frame).execute(scene)?);
    for id in std::iter::once(frame).chain(scene.descendants(frame)?) {
        for issue in Validate::new(id).execute(scene)? {
            println!("{}: {issue}", scene.node(id)?.name);
        }
    }

    let manager = ProjectManager::new();
    manager.save(scene, &path, ProjectMetadata::named("Demo frame").with_author("demo"))?;
    let info = manager.project_info(&path)?;
    println!(
        "saved {} solutions ({} bytes) to {}",
        info.solutions_count,
        info.file_size,
        path.display()
    );

    let loaded = manager.load(&path)?;
    println!("reloaded {} solutions, {} roots", loaded.scene.len(), loaded.roots.len());

    let summary = registry.shutdown();
    println!("released {} modules, {} solutions", summary.modules, summary.solutions);
    Ok(())
}
