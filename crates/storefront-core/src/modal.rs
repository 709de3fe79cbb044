//! Modal state machine.
//!
//! Each modal is either `Closed` or `Open`. Opening happens on the header
//! trigger or programmatically; closing on overlay click, the close control,
//! or Escape (which closes every open modal).

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Cart,
    Wishlist,
}

impl ModalKind {
    pub const ALL: [ModalKind; 2] = [ModalKind::Cart, ModalKind::Wishlist];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Cart => "cartModal",
            Self::Wishlist => "wishlistModal",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.element_id() == id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Debug, Default)]
pub struct Modals {
    cart: ModalState,
    wishlist: ModalState,
}

impl Modals {
    pub fn state(&self, kind: ModalKind) -> ModalState {
        match kind {
            ModalKind::Cart => self.cart,
            ModalKind::Wishlist => self.wishlist,
        }
    }

    fn slot(&mut self, kind: ModalKind) -> &mut ModalState {
        match kind {
            ModalKind::Cart => &mut self.cart,
            ModalKind::Wishlist => &mut self.wishlist,
        }
    }

    pub fn open(&mut self, kind: ModalKind) {
        *self.slot(kind) = ModalState::Open;
    }

    /// Returns true if the modal was open.
    pub fn close(&mut self, kind: ModalKind) -> bool {
        std::mem::replace(self.slot(kind), ModalState::Closed) == ModalState::Open
    }

    /// Escape handling: close everything, report what was closed.
    pub fn close_all(&mut self) -> Vec<ModalKind> {
        ModalKind::ALL.into_iter().filter(|k| self.close(*k)).collect()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.state(kind) == ModalState::Open
    }

    /// Page scrolling stays locked while this holds.
    pub fn any_open(&self) -> bool {
        ModalKind::ALL.into_iter().any(|k| self.is_open(k))
    }
}
