use three_d::{CpuMesh, Mat4, SquareMatrix};

/// A set of positioned instances sharing a single template mesh.
///
/// The batch size is fixed at construction; a change in layout data requires
/// discarding and rebuilding the batch.
#[derive(Clone)]
pub struct InstanceBatch {
    name: String,
    mesh: CpuMesh,
    transformations: Vec<Mat4>,
}

impl InstanceBatch {
    /// Creates a batch of `length` instances of the given template mesh, all
    /// at the identity transform.
    pub(crate) fn new(name: &str, mesh: &CpuMesh, length: usize) -> Self {
        Self {
            name: name.to_owned(),
            mesh: mesh.clone(),
            transformations: vec![Mat4::identity(); length],
        }
    }

    /// Writes the transform of the instance at `index`. Writes outside the
    /// batch are ignored.
    pub(crate) fn set(&mut self, index: usize, transformation: Mat4) {
        if let Some(slot) = self.transformations.get_mut(index) {
            *slot = transformation;
        }
    }

    /// Returns the name of the template this batch instantiates.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the template mesh shared by all instances.
    #[must_use]
    pub fn mesh(&self) -> &CpuMesh {
        &self.mesh
    }

    /// Returns the per-instance transforms.
    #[must_use]
    pub fn transformations(&self) -> &[Mat4] {
        &self.transformations
    }

    /// Consumes the batch, returning the template mesh and the per-instance
    /// transforms for upload.
    #[must_use]
    pub fn into_parts(self) -> (CpuMesh, Vec<Mat4>) {
        (self.mesh, self.transformations)
    }
}
