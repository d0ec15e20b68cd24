use crate::{consts::LABEL_COUNT, CifarImage};

/// Class names of the CIFAR-10 dataset, indexed by label.
pub const CIFAR10_LABEL_NAMES: [&str; LABEL_COUNT] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

/// The CIFAR-10 class table.
pub const CIFAR10_LABELS: ClassLabels<'static> = ClassLabels::new(&CIFAR10_LABEL_NAMES);

/// Ordered mapping from label index to class name.
///
/// The decoder never looks names up itself; callers pass a table in wherever a name is needed,
/// so the dataset's own table can be swapped for any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassLabels<'a> {
    names: &'a [&'a str],
}

impl<'a> ClassLabels<'a> {
    pub const fn new(names: &'a [&'a str]) -> Self {
        Self { names }
    }

    #[inline]
    pub fn name(&self, label: u8) -> Option<&'a str> {
        self.names.get(usize::from(label)).copied()
    }

    /// Name of the class the image is labeled with.
    #[inline]
    pub fn name_of(&self, image: &CifarImage) -> Option<&'a str> {
        self.name(image.label())
    }

    pub const fn len(&self) -> usize {
        self.names.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.names.iter().copied()
    }
}

impl Default for ClassLabels<'static> {
    fn default() -> Self {
        CIFAR10_LABELS
    }
}
