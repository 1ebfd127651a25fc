use config::{FiniteFloat, HalfLayout, Vec3};
use glam::{DAffine3, DMat4};
use three_d::Mat4;

use crate::{
    batch::InstanceBatch,
    registry::{TemplateRegistry, SWITCH_TEMPLATE},
};

/// The instance batches of one keyboard half: one switch instance per anchor
/// plus one keycap batch per row with an available template.
pub struct ResolvedHalf {
    /// The switch instances, one per anchor.
    pub switches: InstanceBatch,
    /// One binding per row in the layout, in row-name order.
    pub rows: Vec<RowBinding>,
}

/// The outcome of binding a single row to its template mesh.
pub enum RowBinding {
    /// The row was bound and its keycap instances were positioned.
    Bound(InstanceBatch),
    /// The row was skipped as no template mesh is registered under its name.
    Skipped {
        /// The name of the skipped row.
        row: String,
    },
}

/// Resolves the layout of one keyboard half into instance batches.
///
/// Every anchor contributes a translation-only switch transform at its slot
/// index. A keycap transform is additionally written into the batch of every
/// row whose slot map assigns the slot an ordinal; a slot no row claims
/// leaves its keycap instance at the identity transform. Conflicting layout
/// data is not rejected here: a slot claimed by several rows is written into
/// all of their batches, and duplicate ordinals within a row overwrite each
/// other in slot order. Use [`check_consistency`] to detect such data.
///
/// Returns `None` if no switch prototype mesh is registered, as switch
/// geometry is a prerequisite for every instance write.
///
/// [`check_consistency`]: crate::check_consistency
#[must_use]
pub fn resolve(half: &HalfLayout, registry: &TemplateRegistry) -> Option<ResolvedHalf> {
    let switch_mesh = registry.switch()?;

    let mut bound = Vec::new();
    let mut skipped = Vec::new();
    for (name, row) in &half.rows {
        match registry.get(name) {
            Some(mesh) => bound.push((row, InstanceBatch::new(name, mesh, row.length))),
            None => skipped.push(RowBinding::Skipped { row: name.clone() }),
        }
    }

    let mut switches = InstanceBatch::new(SWITCH_TEMPLATE, switch_mesh, half.anchors.len());

    for (slot, &anchor) in half.anchors.iter().enumerate() {
        let transformation = translation(anchor);

        for (row, batch) in &mut bound {
            if let Some(ordinal) = row.ordinal_at(slot) {
                batch.set(ordinal.index(), transformation);
            }
        }
        switches.set(slot, transformation);
    }

    let rows = bound
        .into_iter()
        .map(|(_, batch)| RowBinding::Bound(batch))
        .chain(skipped)
        .collect();

    Some(ResolvedHalf { switches, rows })
}

/// Creates the translation-only transform placing an instance at the given
/// anchor.
fn translation(anchor: Vec3<FiniteFloat>) -> Mat4 {
    let matrix: DMat4 = DAffine3::from_translation(anchor.into()).into();

    matrix.as_mat4().to_cols_array_2d().into()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use config::{Ordinal, RowTemplate};
    use three_d::{vec3, CpuMesh, SquareMatrix};

    use super::*;

    fn anchor(x: f64, y: f64, z: f64) -> Vec3<FiniteFloat> {
        Vec3 {
            x: x.try_into().expect("test coordinate should be finite"),
            y: y.try_into().expect("test coordinate should be finite"),
            z: z.try_into().expect("test coordinate should be finite"),
        }
    }

    fn row(length: usize, matrix: &[u32]) -> RowTemplate {
        RowTemplate {
            length,
            slots: matrix.iter().map(|&value| Ordinal::new(value)).collect(),
        }
    }

    fn half(anchors: Vec<Vec3<FiniteFloat>>, rows: &[(&str, RowTemplate)]) -> HalfLayout {
        HalfLayout {
            anchors,
            rows: rows
                .iter()
                .map(|(name, row)| ((*name).to_owned(), row.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn registry_with(names: &[&str]) -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        for &name in names {
            registry
                .insert(name, CpuMesh::cube())
                .expect("test template names should be unique");
        }

        registry
    }

    #[allow(clippy::cast_possible_truncation)]
    fn translate(x: f64, y: f64, z: f64) -> Mat4 {
        Mat4::from_translation(vec3(x as f32, y as f32, z as f32))
    }

    fn keycap_batches(resolved: &ResolvedHalf) -> Vec<&InstanceBatch> {
        resolved
            .rows
            .iter()
            .filter_map(|binding| match binding {
                RowBinding::Bound(batch) => Some(batch),
                RowBinding::Skipped { .. } => None,
            })
            .collect()
    }

    #[test]
    fn switch_batch_covers_every_anchor() {
        let half = half(
            vec![anchor(0.0, 0.0, 0.0), anchor(1.0, 2.0, 3.0), anchor(-1.0, 0.5, 0.0)],
            &[],
        );
        let resolved = resolve(&half, &registry_with(&["switch"])).expect("switch is registered");

        assert_eq!(resolved.switches.transformations().len(), 3);
        assert_eq!(resolved.switches.transformations()[0], translate(0.0, 0.0, 0.0));
        assert_eq!(resolved.switches.transformations()[1], translate(1.0, 2.0, 3.0));
        assert_eq!(resolved.switches.transformations()[2], translate(-1.0, 0.5, 0.0));
    }

    #[test]
    fn keycaps_land_at_their_ordinals() {
        // Scenario A: both slots mapped, ordinals in slot order.
        let half = half(
            vec![anchor(0.0, 0.0, 0.0), anchor(1.0, 0.0, 0.0)],
            &[("r1", row(2, &[1, 2]))],
        );
        let resolved =
            resolve(&half, &registry_with(&["switch", "r1"])).expect("switch is registered");

        let batches = keycap_batches(&resolved);
        assert_eq!(batches.len(), 1);
        let transformations = batches[0].transformations();
        assert_eq!(transformations.len(), 2);
        assert_eq!(transformations[0], translate(0.0, 0.0, 0.0));
        assert_eq!(transformations[1], translate(1.0, 0.0, 0.0));

        assert_eq!(resolved.switches.transformations().len(), 2);
    }

    #[test]
    fn unmapped_slot_leaves_the_instance_at_identity() {
        // Scenario B: slot 0 carries no ordinal, so only ordinal 1 is written.
        let half = half(
            vec![anchor(0.0, 0.0, 0.0), anchor(1.0, 0.0, 0.0)],
            &[("r1", row(2, &[0, 1]))],
        );
        let resolved =
            resolve(&half, &registry_with(&["switch", "r1"])).expect("switch is registered");

        let batches = keycap_batches(&resolved);
        let transformations = batches[0].transformations();
        assert_eq!(transformations[0], translate(1.0, 0.0, 0.0));
        assert_eq!(transformations[1], Mat4::identity());
        // The switch batch is unaffected by the missing keycap.
        assert_eq!(resolved.switches.transformations()[0], translate(0.0, 0.0, 0.0));
    }

    #[test]
    fn row_without_template_is_skipped() {
        // Scenario C: `ghost` has no registered template mesh.
        let half = half(
            vec![anchor(0.0, 0.0, 0.0), anchor(1.0, 0.0, 0.0)],
            &[("ghost", row(2, &[1, 2])), ("r1", row(2, &[1, 2]))],
        );
        let resolved =
            resolve(&half, &registry_with(&["switch", "r1"])).expect("switch is registered");

        let skipped: Vec<_> = resolved
            .rows
            .iter()
            .filter_map(|binding| match binding {
                RowBinding::Skipped { row } => Some(row.as_str()),
                RowBinding::Bound(_) => None,
            })
            .collect();
        assert_eq!(skipped, ["ghost"]);

        let batches = keycap_batches(&resolved);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].name(), "r1");
        assert_eq!(batches[0].transformations().len(), 2);
        assert_eq!(resolved.switches.transformations().len(), 2);
    }

    #[test]
    fn slot_claimed_by_two_rows_is_written_into_both_batches() {
        // Scenario D: slot 2 is claimed by `r1` and `r2`.
        let half = half(
            vec![
                anchor(0.0, 0.0, 0.0),
                anchor(1.0, 0.0, 0.0),
                anchor(2.0, 0.0, 0.0),
            ],
            &[("r1", row(3, &[1, 2, 3])), ("r2", row(1, &[0, 0, 1]))],
        );
        let resolved =
            resolve(&half, &registry_with(&["switch", "r1", "r2"])).expect("switch is registered");

        let batches = keycap_batches(&resolved);
        assert_eq!(batches[0].transformations()[2], translate(2.0, 0.0, 0.0));
        assert_eq!(batches[1].transformations()[0], translate(2.0, 0.0, 0.0));
    }

    #[test]
    fn missing_switch_template_yields_no_batches() {
        let half = half(
            vec![anchor(0.0, 0.0, 0.0)],
            &[("r1", row(1, &[1]))],
        );

        assert!(resolve(&half, &registry_with(&["r1"])).is_none());
    }

    #[test]
    fn ordinal_outside_the_batch_is_ignored() {
        let half = half(vec![anchor(1.0, 0.0, 0.0)], &[("r1", row(1, &[5]))]);
        let resolved =
            resolve(&half, &registry_with(&["switch", "r1"])).expect("switch is registered");

        let batches = keycap_batches(&resolved);
        assert_eq!(batches[0].transformations(), [Mat4::identity()]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = registry_with(&["switch", "r1"]);
        let half = half(
            vec![anchor(0.5, 0.25, -0.5), anchor(1.5, 0.25, -0.5)],
            &[("r1", row(2, &[2, 1]))],
        );

        let first = resolve(&half, &registry).expect("switch is registered");
        let second = resolve(&half, &registry).expect("switch is registered");

        assert_eq!(
            first.switches.transformations(),
            second.switches.transformations()
        );
        for (a, b) in keycap_batches(&first).iter().zip(keycap_batches(&second)) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.transformations(), b.transformations());
        }
    }
}
