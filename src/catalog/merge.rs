//! Folds per-module catalogs into the master catalog.

use crate::catalog::model::{CatalogSections, TestCatalog};

/// Merge one source catalog into `master`.
///
/// `classes`, `bundles`, and `sharedEnvironments` are last-writer-wins per
/// key. `packages` only ever grows: source class names are appended in order,
/// duplicates included. Metadata is never touched.
pub fn merge_into(master: &mut TestCatalog, source: CatalogSections) {
    let sections = master.sections_mut();

    sections.classes.extend(source.classes);

    for (package, classes) in source.packages {
        sections.packages.entry(package).or_default().extend(classes);
    }

    sections.bundles.extend(source.bundles);
    sections
        .shared_environments
        .extend(source.shared_environments);
}
