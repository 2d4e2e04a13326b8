//! Dependency graph for conditional fields
//!
//! Each `depends_on` edge points from a target to its dependent. The order is
//! computed once at build time so visibility can be re-evaluated in a single
//! pass after every change.

use crate::error::{FormError, FormResult};
use crate::field::FieldDescriptor;
use std::collections::{BTreeSet, HashMap};

/// Field indices such that every target comes before its dependents
///
/// Ties keep declaration order. Unknown targets and cycles (including a field
/// depending on itself) are rejected.
pub(crate) fn topological_order(fields: &[FieldDescriptor]) -> FormResult<Vec<usize>> {
	let index: HashMap<&str, usize> = fields
		.iter()
		.enumerate()
		.map(|(i, f)| (f.name.as_str(), i))
		.collect();

	let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); fields.len()];
	let mut in_degree = vec![0usize; fields.len()];

	for (i, field) in fields.iter().enumerate() {
		if let Some(target) = &field.depends_on {
			let &t = index
				.get(target.as_str())
				.ok_or_else(|| FormError::UnknownDependency {
					field: field.name.clone(),
					target: target.clone(),
				})?;
			dependents[t].push(i);
			in_degree[i] += 1;
		}
	}

	let mut ready: BTreeSet<usize> = (0..fields.len()).filter(|&i| in_degree[i] == 0).collect();
	let mut order = Vec::with_capacity(fields.len());

	while let Some(next) = ready.pop_first() {
		order.push(next);
		for &dependent in &dependents[next] {
			in_degree[dependent] -= 1;
			if in_degree[dependent] == 0 {
				ready.insert(dependent);
			}
		}
	}

	if order.len() < fields.len() {
		let cycle: Vec<String> = (0..fields.len())
			.filter(|&i| in_degree[i] > 0)
			.map(|i| fields[i].name.clone())
			.collect();
		return Err(FormError::DependencyCycle(cycle));
	}

	Ok(order)
}
