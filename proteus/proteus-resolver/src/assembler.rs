//! Builds one protobuf [`Package`] from one scanned Go package.

use proteus_core::{
    Enum, EnumValue, Field, Message, OptionValue, Package, ScannedPackage, scanner,
};

use crate::{
    error::{ResolveError, ResolveErrors},
    type_resolver::{FieldContext, TypeResolver},
};

/// Assemble the protobuf package for `pkg`.
///
/// Every failing field and enum is reported; the package is only returned when
/// there are none.
pub fn assemble_package(
    pkg: &ScannedPackage,
    types: &TypeResolver,
) -> Result<Package, ResolveErrors> {
    let mut out = Package::new(&pkg.path);
    out.options
        .set("go_package", OptionValue::string(go_package_name(&pkg.path)));

    let mut errors = Vec::new();

    for st in &pkg.structs {
        let msg = assemble_message(pkg, st, types, &mut out, &mut errors);
        out.messages.push(msg);
    }

    for e in &pkg.enums {
        match assemble_enum(pkg, e, types) {
            Ok(e) => out.enums.push(e),
            Err(err) => errors.push(err),
        }
    }

    if !errors.is_empty() {
        return Err(ResolveErrors(errors));
    }

    log::debug!(
        "resolved package '{}': {} messages, {} enums, {} imports",
        out.path,
        out.messages.len(),
        out.enums.len(),
        out.imports().len()
    );
    Ok(out)
}

fn assemble_message(
    pkg: &ScannedPackage,
    st: &scanner::Struct,
    types: &TypeResolver,
    out: &mut Package,
    errors: &mut Vec<ResolveError>,
) -> Message {
    let mut msg = Message::new(&st.name);
    msg.options = st.options.clone();
    for pos in &st.reserved {
        msg.reserve(*pos);
    }

    for f in &st.fields {
        let ctx = FieldContext::new(&pkg.path, &st.name, &f.name);
        let resolved = match types.resolve(&f.ty, &ctx) {
            Ok(resolved) => resolved,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };
        for file in resolved.imports {
            out.import(file);
        }
        let pos = msg.next_position();
        msg.fields.push(Field {
            name: f.name.clone(),
            pos,
            repeated: resolved.repeated,
            ty: resolved.ty,
            options: f.options.clone(),
        });
    }

    msg
}

fn assemble_enum(
    pkg: &ScannedPackage,
    e: &scanner::Enum,
    types: &TypeResolver,
) -> Result<Enum, ResolveError> {
    let qualified = pkg.qualify(&e.name);
    match types.symbols().enum_owner(&qualified) {
        Some(owner) if owner == pkg.path => {}
        owner => {
            return Err(ResolveError::DuplicateEnum {
                name: qualified,
                first: owner.unwrap_or_default().to_string(),
                second: pkg.path.clone(),
            });
        }
    }

    Ok(Enum {
        name: e.name.clone(),
        options: e.options.clone(),
        values: e
            .values
            .iter()
            .zip(0u32..)
            .map(|(v, value)| EnumValue {
                name: v.name.clone(),
                value,
                options: v.options.clone(),
            })
            .collect(),
    })
}

/// Last element of an import path, the name Go code refers to it by.
fn go_package_name(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}
