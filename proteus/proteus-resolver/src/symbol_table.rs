//! Project-wide index of aliases, enums and structs.
//!
//! A field in one package may name an alias or enum declared only in another,
//! and packages are not visited in dependency order, so the whole table is
//! built before any package is resolved and is read-only afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap, hash_map::Entry};

use proteus_core::{ScannedPackage, SourceType};

use crate::{
    error::{ResolveError, ResolveErrors},
    policy::AliasConflictPolicy,
};

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    packages: BTreeSet<String>,
    /// Qualified alias name → underlying type. Enum names are never aliases.
    aliases: BTreeMap<String, SourceType>,
    /// Qualified enum name → declaring package path.
    enums: HashMap<String, String>,
    /// Qualified struct name → declaring package path.
    records: HashMap<String, String>,
}

impl SymbolTable {
    /// Index every package of the run.
    ///
    /// All conflicts are reported together rather than stopping at the first.
    pub fn build(
        packages: &[ScannedPackage],
        alias_policy: AliasConflictPolicy,
    ) -> Result<Self, ResolveErrors> {
        let mut table = SymbolTable::default();
        let mut errors = Vec::new();

        for pkg in packages {
            if !table.packages.insert(pkg.path.clone()) {
                errors.push(ResolveError::DuplicatePackage {
                    path: pkg.path.clone(),
                });
            }
        }

        for pkg in packages {
            for e in &pkg.enums {
                match table.enums.entry(pkg.qualify(&e.name)) {
                    Entry::Occupied(existing) => errors.push(ResolveError::DuplicateEnum {
                        name: existing.key().clone(),
                        first: existing.get().clone(),
                        second: pkg.path.clone(),
                    }),
                    Entry::Vacant(slot) => {
                        slot.insert(pkg.path.clone());
                    }
                }
            }
            for s in &pkg.structs {
                table.records.insert(pkg.qualify(&s.name), pkg.path.clone());
            }
        }

        let mut alias_owners: HashMap<&str, &str> = HashMap::new();
        for pkg in packages {
            for (name, ty) in &pkg.aliases {
                if table.enums.contains_key(name) {
                    continue;
                }
                match table.aliases.get(name) {
                    Some(existing) if existing == ty => {}
                    Some(existing) => match alias_policy {
                        AliasConflictPolicy::Reject => {
                            errors.push(ResolveError::DuplicateAlias {
                                name: name.clone(),
                                first: existing.to_string(),
                                first_package: alias_owners
                                    .get(name.as_str())
                                    .map(|p| p.to_string())
                                    .unwrap_or_default(),
                                second: ty.to_string(),
                                second_package: pkg.path.clone(),
                            });
                            continue;
                        }
                        AliasConflictPolicy::LastWins => {
                            log::warn!(
                                "alias '{name}' redeclared in '{}' as '{ty}', replacing '{existing}'",
                                pkg.path
                            );
                        }
                    },
                    None => {}
                }
                table.aliases.insert(name.clone(), ty.clone());
                alias_owners.insert(name, &pkg.path);
            }
        }

        if !errors.is_empty() {
            return Err(ResolveErrors(errors));
        }

        log::debug!(
            "symbol table: {} packages, {} aliases, {} enums, {} structs",
            table.packages.len(),
            table.aliases.len(),
            table.enums.len(),
            table.records.len()
        );
        Ok(table)
    }

    /// Paths of every scanned package.
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    /// Every declared alias that is not an enum, referenced or not.
    /// Sorted by qualified name.
    pub fn aliases(&self) -> &BTreeMap<String, SourceType> {
        &self.aliases
    }

    pub fn alias(&self, qualified_name: &str) -> Option<&SourceType> {
        self.aliases.get(qualified_name)
    }

    /// Qualified names of all enums, sorted.
    pub fn enum_names(&self) -> BTreeSet<&str> {
        self.enums.keys().map(String::as_str).collect()
    }

    pub fn is_enum(&self, qualified_name: &str) -> bool {
        self.enums.contains_key(qualified_name)
    }

    /// Path of the package declaring the enum.
    pub fn enum_owner(&self, qualified_name: &str) -> Option<&str> {
        self.enums.get(qualified_name).map(String::as_str)
    }

    pub fn is_record(&self, qualified_name: &str) -> bool {
        self.records.contains_key(qualified_name)
    }
}

/// Qualified names of every enum declared in `packages`.
///
/// Names declared twice collapse into one entry; use [`SymbolTable::build`] to
/// detect that.
pub fn enum_names(packages: &[ScannedPackage]) -> BTreeSet<String> {
    packages
        .iter()
        .flat_map(|pkg| pkg.enums.iter().map(|e| pkg.qualify(&e.name)))
        .collect()
}
