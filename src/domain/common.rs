use uuid::Uuid;

/// Entities stored in the wallet and looked up by identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// One-line label used in logs and summaries.
pub trait Displayable {
    fn display_label(&self) -> String;
}

pub(crate) fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub(crate) fn find_by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

pub(crate) fn position_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
