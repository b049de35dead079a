
use proteus_core::{
    BasicKind, Message, Named, OptionValue, Options, Scalar, SourceType, Type,
    scanner::{Field, Struct},
};
use proteus_resolver::{AliasConflictPolicy, FieldContext, ResolveError, Resolver, TypeResolver};
use test_helpers::*;

fn assert_message(msg: &Message, name: &str, fields: &[&str]) {
    assert_eq!(msg.name, name, "message name");
    let names: Vec<_> = msg.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, fields, "fields of {name}");
}

#[test]
fn resolves_fixture_packages() {
    let packages = fixture_packages();
    let schema = Resolver::new().resolve(&packages).expect("resolve should succeed");
    assert_eq!(schema.len(), 2);

    let pkg = schema.get(FIXTURES).expect("fixtures package");
    assert_eq!(pkg.name, "github.com.example.fixtures");
    assert_message(&pkg.messages[0], "Bar", &["Bar", "Baz"]);
    assert_message(
        &pkg.messages[1],
        "Foo",
        &[
            "Bar",
            "Baz",
            "IntList",
            "IntArray",
            "Map",
            "Timestamp",
            "Duration",
            "Aliased",
        ],
    );

    let foo = &pkg.messages[1];
    let positions: Vec<_> = foo.fields.iter().map(|f| f.pos).collect();
    assert_eq!(positions, (1..=8u32).collect::<Vec<_>>());

    let aliased = foo.fields.last().unwrap();
    assert!(aliased.repeated, "Aliased should be repeated");
    assert_eq!(aliased.ty, Type::Basic(Scalar::Int64));
}

#[test]
fn fixture_field_types() {
    let schema = Resolver::new().resolve(&fixture_packages()).unwrap();
    let pkg = schema.get(FIXTURES).unwrap();
    let foo = pkg.message("Foo").unwrap();
    let ty = |name: &str| {
        let f = foo.field(name).unwrap();
        (f.ty.clone(), f.repeated)
    };

    let local = "github.com.example.fixtures";
    let sub = "github.com.example.fixtures.subpkg";
    assert_eq!(ty("Bar"), (Type::named(local, "Bar"), false));
    assert_eq!(ty("Baz"), (Type::named(sub, "Point"), false));
    assert_eq!(ty("IntList"), (Type::Basic(Scalar::Int64), true));
    assert_eq!(ty("IntArray"), (Type::Basic(Scalar::Int64), true));
    assert_eq!(
        ty("Map"),
        (Type::map(Scalar::String, Named::new(sub, "Point").into()), false)
    );
    assert_eq!(
        ty("Timestamp"),
        (Type::named("google.protobuf", "Timestamp"), false)
    );
    assert_eq!(
        ty("Duration"),
        (Type::named("google.protobuf", "Duration"), false)
    );

    let bar = pkg.message("Bar").unwrap();
    assert_eq!(bar.field("Baz").unwrap().ty, Type::named(local, "Status"));
}

#[test]
fn aliased_slice_unwraps_to_host_int() {
    let packages = fixture_packages();
    let resolver = Resolver::new();
    let symbols = resolver.symbol_table(&packages).unwrap();
    let types = TypeResolver::new(&symbols, resolver.registry());

    let unwrapped = types
        .unwrap(
            &SourceType::slice(named(FIXTURES, "MyInt")),
            &FieldContext::new(FIXTURES, "Foo", "Aliased"),
        )
        .unwrap();
    assert!(unwrapped.repeated);
    assert_eq!(unwrapped.ty, basic(BasicKind::Int));
}

#[test]
fn imports_follow_first_use_order() {
    let schema = Resolver::new().resolve(&fixture_packages()).unwrap();

    let pkg = schema.get(FIXTURES).unwrap();
    assert_eq!(
        pkg.imports(),
        &[
            "github.com/example/fixtures/subpkg/generated.proto".to_string(),
            "google/protobuf/timestamp.proto".to_string(),
            "google/protobuf/duration.proto".to_string(),
        ]
    );
    assert!(schema.get(SUBPKG).unwrap().imports().is_empty());
}

#[test]
fn enums_are_numbered_in_declaration_order() {
    let schema = Resolver::new().resolve(&fixture_packages()).unwrap();
    let status = schema.get(FIXTURES).unwrap().enumeration("Status").unwrap();
    let values: Vec<_> = status
        .values
        .iter()
        .map(|v| (v.name.as_str(), v.value))
        .collect();
    assert_eq!(values, vec![("Active", 0), ("Inactive", 1)]);
}

#[test]
fn package_gets_go_package_option() {
    let schema = Resolver::new().resolve(&fixture_packages()).unwrap();
    let pkg = schema.get(SUBPKG).unwrap();
    assert_eq!(
        pkg.options.get("go_package"),
        Some(&OptionValue::string("subpkg"))
    );
}

#[test]
fn options_are_copied_through() {
    let mut f = Field::new("Name", basic(BasicKind::String));
    f.options.set("deprecated", OptionValue::literal("true"));
    let mut st = Struct::new("User", vec![f]);
    st.options = Options::from([("(x.y)", OptionValue::string("z"))]);
    let mut pkg = package("users");
    pkg.structs.push(st);

    let schema = Resolver::new().resolve(&[pkg]).unwrap();
    let msg = schema.get("users").unwrap().message("User").unwrap();
    assert_eq!(msg.options.get("(x.y)"), Some(&OptionValue::string("z")));
    assert_eq!(
        msg.fields[0].options.get("deprecated"),
        Some(&OptionValue::literal("true"))
    );
}

#[test]
fn reserved_positions_are_skipped() {
    let mut st = Struct::new(
        "Evolving",
        vec![
            Field::new("A", basic(BasicKind::Bool)),
            Field::new("B", basic(BasicKind::Bool)),
            Field::new("C", basic(BasicKind::Bool)),
        ],
    );
    st.reserved = vec![1, 3, 3];
    let mut pkg = package("evo");
    pkg.structs.push(st);

    let schema = Resolver::new().resolve(&[pkg]).unwrap();
    let msg = schema.get("evo").unwrap().message("Evolving").unwrap();
    let positions: Vec<_> = msg.fields.iter().map(|f| f.pos).collect();
    assert_eq!(positions, vec![2, 4, 5]);
    assert_eq!(msg.reserved().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn empty_input_yields_empty_schema() {
    let schema = Resolver::new().resolve(&[]).unwrap();
    assert!(schema.is_empty());
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let packages = fixture_packages();
    let parallel = Resolver::builder().parallel(true).build().resolve(&packages);
    let sequential = Resolver::builder().parallel(false).build().resolve(&packages);
    assert_eq!(parallel, sequential);
}

#[test]
fn failing_package_does_not_hide_sibling_errors() {
    let first = single_field("first", named("net/url", "URL"));
    let ok = single_field("ok", basic(BasicKind::String));
    let second = single_field(
        "second",
        SourceType::map(named("second", "S"), basic(BasicKind::String)),
    );

    let err = Resolver::new().resolve(&[first, ok, second]).unwrap_err();
    assert_eq!(
        err.0,
        vec![
            ResolveError::UnsupportedType {
                package: "first".into(),
                record: "S".into(),
                field: "F".into(),
                ty: "net/url.URL".into(),
            },
            ResolveError::InvalidMapKey {
                package: "second".into(),
                record: "S".into(),
                field: "F".into(),
                key: "second.S".into(),
            },
        ]
    );
}

#[test]
fn duplicate_enum_aborts_the_whole_run() {
    let mut a = package("a");
    a.enums.push(enumeration("Kind", &["X"]));
    a.enums.push(enumeration("Kind", &["Y"]));
    let b = single_field("b", basic(BasicKind::Bool));

    let err = Resolver::new().resolve(&[a, b]).unwrap_err();
    assert!(matches!(
        &err.0[..],
        [ResolveError::DuplicateEnum { name, .. }] if name == "a.Kind"
    ));
}

#[test]
fn alias_policy_is_configurable() {
    let mut a = single_field("a", named("shared", "ID"));
    a.aliases.insert("shared.ID".into(), basic(BasicKind::String));
    let mut b = package("b");
    b.aliases.insert("shared.ID".into(), basic(BasicKind::Uint16));
    let packages = vec![a, b];

    let err = Resolver::new().resolve(&packages).unwrap_err();
    assert!(matches!(&err.0[0], ResolveError::DuplicateAlias { .. }));

    let schema = Resolver::builder()
        .alias_policy(AliasConflictPolicy::LastWins)
        .build()
        .resolve(&packages)
        .unwrap();
    let f = &schema.get("a").unwrap().messages[0].fields[0];
    assert_eq!(f.ty, Type::Basic(Scalar::Uint32));
}

#[test]
fn override_wins_over_alias() {
    let pkg = with_alias(
        single_field("ids", named("ids", "ID")),
        "ID",
        basic(BasicKind::String),
    );
    let resolver = Resolver::builder()
        .custom_type(
            "ids.ID",
            Named::new("google.protobuf", "StringValue"),
            "google/protobuf/wrappers.proto",
        )
        .build();

    let schema = resolver.resolve(&[pkg]).unwrap();
    let pkg = schema.get("ids").unwrap();
    assert_eq!(
        pkg.messages[0].fields[0].ty,
        Type::named("google.protobuf", "StringValue")
    );
    assert_eq!(pkg.imports(), &["google/protobuf/wrappers.proto".to_string()]);
}

#[test]
fn independent_runs_do_not_interfere() {
    let custom = Resolver::builder()
        .custom_type("a.T", Named::new("x", "T"), "x.proto")
        .build();
    let plain = Resolver::new();

    let pkg = single_field("b", named("a", "T"));
    assert!(custom.resolve(std::slice::from_ref(&pkg)).is_ok());
    assert!(plain.resolve(&[pkg]).is_err());
}

#[test]
fn aliases_declared_in_later_packages_are_visible() {
    let mut a = package("a");
    a.structs.push(record(
        "S",
        vec![
            field("F", SourceType::slice(named("b", "Ref"))),
            field("N", named("b", "Num")),
        ],
    ));

    let mut b = package("b");
    b.structs.push(record("Thing", vec![]));
    let b = with_alias(b, "Ref", SourceType::pointer(named("b", "Thing")));
    let b = with_alias(b, "Num", basic(BasicKind::Int16));

    let schema = Resolver::new().resolve(&[a, b]).unwrap();
    let pkg = schema.get("a").unwrap();
    let s = pkg.message("S").unwrap();

    let f = s.field("F").unwrap();
    assert_eq!(f.ty, Type::named("b", "Thing"));
    assert!(f.repeated);

    let n = s.field("N").unwrap();
    assert_eq!(n.ty, Type::Basic(Scalar::Int32));
    assert!(!n.repeated);

    assert_eq!(pkg.imports(), &["b/generated.proto".to_string()]);
}

#[test]
fn resolved_packages_are_keyed_by_path() {
    let packages = Resolver::new()
        .resolve(&fixture_packages())
        .unwrap()
        .into_packages();
    assert_eq!(
        packages.keys().collect::<Vec<_>>(),
        vec![FIXTURES, SUBPKG]
    );
    assert_eq!(packages[SUBPKG].messages[0].name, "Point");
}

#[test]
fn run_errors_render_every_error() {
    let first = single_field("first", named("net/url", "URL"));
    let second = single_field("second", named("net/url", "URL"));

    let err = Resolver::new().resolve(&[first, second]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "2 resolution errors\n  \
         unsupported type 'net/url.URL' in field 'F' of struct 'S' (package 'first')\n  \
         unsupported type 'net/url.URL' in field 'F' of struct 'S' (package 'second')"
    );

    let single = Resolver::new()
        .resolve(&[single_field("only", named("net/url", "URL"))])
        .unwrap_err();
    assert_eq!(
        single.to_string(),
        "unsupported type 'net/url.URL' in field 'F' of struct 'S' (package 'only')"
    );
}
