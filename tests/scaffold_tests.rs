use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crudforge::scaffold::{Feature, Generator, IMPORT_SENTINEL, REGISTRY_SENTINEL};

const ROUTES_STUB: &str = "\
use axum::Router;
use sea_orm::DatabaseConnection;

use crate::modules::Module;

use crate::modules::users;
// MODULE IMPORTS

pub fn api_router(db: &DatabaseConnection) -> Router {
    let modules: Vec<Box<dyn Module>> = vec![
        Box::new(users::UserModule),
        // MODULE REGISTRY
    ];

    let mut api = Router::new();
    for module in &modules {
        api = module.register(api, db);
    }
    api
}
";

fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

fn setup_root() -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("src/modules")).unwrap();
    fs::write(root.path().join("src/modules/mod.rs"), "pub mod users;\n").unwrap();
    fs::write(root.path().join("src/routes.rs"), ROUTES_STUB).unwrap();
    root
}

fn generator(root: &TempDir) -> Generator {
    Generator::new(root.path(), templates_dir())
}

fn read(root: &TempDir, rel: &str) -> String {
    fs::read_to_string(root.path().join(rel)).unwrap()
}

#[test]
fn generates_the_full_module_layout() {
    let root = setup_root();
    generator(&root).run("master/area").unwrap();

    let base = "src/modules/master/areas";
    for rel in [
        "mod.rs",
        "routes.rs",
        "models/area.rs",
        "validations/area.rs",
        "services/area.rs",
        "controllers/area.rs",
        "repositories/area.rs",
        "dto/area.rs",
    ] {
        assert!(
            root.path().join(base).join(rel).exists(),
            "missing generated file {rel}"
        );
    }

    let model = read(&root, "src/modules/master/areas/models/area.rs");
    assert!(model.contains(r#"table_name = "areas""#));
    assert!(model.contains("impl CrudEntity for Entity"));

    let module = read(&root, "src/modules/master/areas/mod.rs");
    assert!(module.contains("pub struct AreaModule;"));
    assert!(module.contains(r#"api.nest("/areas", routes::routes(db))"#));

    let service = read(&root, "src/modules/master/areas/services/area.rs");
    assert!(service.contains("pub struct AreaService"));
    assert!(service.contains(r#"const RESOURCE: &str = "Area";"#));
}

#[test]
fn declares_the_module_in_every_ancestor() {
    let root = setup_root();
    generator(&root).run("master/area").unwrap();

    assert!(read(&root, "src/modules/mod.rs").contains("pub mod master;"));
    assert!(read(&root, "src/modules/master/mod.rs").contains("pub mod areas;"));
}

#[test]
fn patches_routes_above_the_sentinels() {
    let root = setup_root();
    generator(&root).run("master/area").unwrap();

    let routes = read(&root, "src/routes.rs");
    let import = "use crate::modules::master::areas;";
    let registry = "Box::new(areas::AreaModule),";

    assert!(routes.contains(import));
    assert!(routes.contains(registry));
    assert!(routes.find(import).unwrap() < routes.find(IMPORT_SENTINEL).unwrap());
    assert!(routes.find(registry).unwrap() < routes.find(REGISTRY_SENTINEL).unwrap());
    // The pre-existing registration stays first.
    assert!(routes.find("Box::new(users::UserModule),").unwrap() < routes.find(registry).unwrap());
}

#[test]
fn update_routes_never_duplicates_lines() {
    let root = setup_root();
    let generator = generator(&root);
    generator.run("master/area").unwrap();

    let feature = Feature::parse("master/area").unwrap();
    generator.update_routes(&feature).unwrap();

    let routes = read(&root, "src/routes.rs");
    assert_eq!(routes.matches("use crate::modules::master::areas;").count(), 1);
    assert_eq!(routes.matches("Box::new(areas::AreaModule),").count(), 1);
}

#[test]
fn insertion_guard_matches_exact_text_only() {
    let root = setup_root();
    // A reformatted but equivalent import does not suppress the insertion.
    let stub = ROUTES_STUB.replace(
        "use crate::modules::users;",
        "use crate::modules::users;\nuse  crate::modules::cities;",
    );
    fs::write(root.path().join("src/routes.rs"), stub).unwrap();

    generator(&root).run("city").unwrap();

    let routes = read(&root, "src/routes.rs");
    assert!(routes.contains("use  crate::modules::cities;"));
    assert_eq!(routes.matches("use crate::modules::cities;").count(), 1);
}

#[test]
fn rerun_fails_on_existing_output() {
    let root = setup_root();
    let generator = generator(&root);
    generator.run("city").unwrap();

    let err = generator.run("city").unwrap_err();
    assert!(err.to_string().contains("file already exists"));
}

#[test]
fn missing_routes_file_is_skipped() {
    let root = setup_root();
    fs::remove_file(root.path().join("src/routes.rs")).unwrap();

    generator(&root).run("city").unwrap();
    assert!(root.path().join("src/modules/cities/models/city.rs").exists());
}

#[test]
fn missing_template_is_fatal() {
    let root = setup_root();
    let generator = Generator::new(root.path(), root.path().join("no-such-templates"));

    let err = generator.run("city").unwrap_err();
    assert!(err.to_string().contains("template not found"));
}

#[test]
fn multi_word_entity_names_stay_consistent() {
    let root = setup_root();
    generator(&root).run("sales-order").unwrap();

    let base = root.path().join("src/modules/sales_orders");
    assert!(base.join("models/sales_order.rs").exists());

    let module = read(&root, "src/modules/sales_orders/mod.rs");
    assert!(module.contains("pub struct SalesOrderModule;"));
    assert!(module.contains(r#"#[path = "models/sales_order.rs"]"#));
    assert!(module.contains(r#"api.nest("/sales-orders", routes::routes(db))"#));

    let routes = read(&root, "src/routes.rs");
    assert!(routes.contains("use crate::modules::sales_orders;"));
    assert!(routes.contains("Box::new(sales_orders::SalesOrderModule),"));
}
