//! Run-scoped entry point tying the resolution phases together.

use std::collections::{BTreeMap, btree_map};

use proteus_core::{Package, ScannedPackage};
use rayon::prelude::*;

use crate::{
    assembler::assemble_package,
    error::ResolveErrors,
    policy::AliasConflictPolicy,
    registry::CustomTypeRegistry,
    symbol_table::SymbolTable,
    type_resolver::TypeResolver,
};

/// Resolves scanned Go packages into protobuf packages.
///
/// A resolver owns its configuration and keeps no state between runs, so
/// independent runs never observe each other.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: CustomTypeRegistry,
    alias_policy: AliasConflictPolicy,
    parallel: bool,
}

/// Builder for configuring [`Resolver`].
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    registry: CustomTypeRegistry,
    alias_policy: AliasConflictPolicy,
    parallel: bool,
}

/// Protobuf packages of one run, keyed by Go package path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedSchema {
    packages: BTreeMap<String, Package>,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder {
            registry: CustomTypeRegistry::default(),
            alias_policy: AliasConflictPolicy::default(),
            parallel: true,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn registry(&self) -> &CustomTypeRegistry {
        &self.registry
    }

    /// Whether the qualified Go type is replaced by a well-known type.
    pub fn is_custom_type(&self, qualified_name: &str) -> bool {
        self.registry.is_override(qualified_name)
    }

    /// Build the symbol table for `packages` without resolving anything.
    pub fn symbol_table(&self, packages: &[ScannedPackage]) -> Result<SymbolTable, ResolveErrors> {
        SymbolTable::build(packages, self.alias_policy)
    }

    /// Resolve every package of a run.
    ///
    /// The symbol table is built first from all packages; then each package is
    /// assembled independently. A failing package does not stop the others,
    /// but the run only succeeds if all of them resolve.
    pub fn resolve(&self, packages: &[ScannedPackage]) -> Result<ResolvedSchema, ResolveErrors> {
        let symbols = self.symbol_table(packages)?;
        let types = TypeResolver::new(&symbols, &self.registry);

        let results: Vec<Result<Package, ResolveErrors>> = if self.parallel {
            packages
                .par_iter()
                .map(|pkg| assemble_package(pkg, &types))
                .collect()
        } else {
            packages
                .iter()
                .map(|pkg| assemble_package(pkg, &types))
                .collect()
        };

        let mut resolved = BTreeMap::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(pkg) => {
                    resolved.insert(pkg.path.clone(), pkg);
                }
                Err(e) => errors.extend(e),
            }
        }

        if !errors.is_empty() {
            return Err(ResolveErrors(errors));
        }
        Ok(ResolvedSchema { packages: resolved })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder {
    /// Replace the override table.
    pub fn registry(mut self, registry: CustomTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add one override to the table.
    pub fn custom_type(
        mut self,
        qualified_name: impl Into<String>,
        named: proteus_core::Named,
        import: impl Into<String>,
    ) -> Self {
        self.registry.insert(qualified_name, named, import);
        self
    }

    pub fn alias_policy(mut self, policy: AliasConflictPolicy) -> Self {
        self.alias_policy = policy;
        self
    }

    /// Resolve packages on the rayon thread pool (default) or sequentially.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            registry: self.registry,
            alias_policy: self.alias_policy,
            parallel: self.parallel,
        }
    }
}

impl ResolvedSchema {
    pub fn get(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages ordered by path.
    pub fn iter(&self) -> btree_map::Values<'_, String, Package> {
        self.packages.values()
    }

    pub fn into_packages(self) -> BTreeMap<String, Package> {
        self.packages
    }
}

impl<'a> IntoIterator for &'a ResolvedSchema {
    type Item = &'a Package;
    type IntoIter = btree_map::Values<'a, String, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
