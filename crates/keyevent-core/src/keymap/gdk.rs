//! GDK keysym values and modifier mask bits.
//!
//! GDK keysyms share their numeric values with X11 keysyms, defined in
//! `gdk/gdkkeysyms.h` (and `X11/keysymdef.h`).
//!
//! # What is a GDK modifier mask? (for beginners)
//!
//! Every GDK key event carries a `state` field: a bitmask describing which
//! modifier keys and mouse buttons were active when the event was generated.
//!
//! | Mask name           | Bit | Value  | Usual meaning            |
//! |---------------------|-----|--------|--------------------------|
//! | `GDK_SHIFT_MASK`    | 0   | 0x0001 | Shift held               |
//! | `GDK_LOCK_MASK`     | 1   | 0x0002 | Caps Lock / Shift Lock   |
//! | `GDK_CONTROL_MASK`  | 2   | 0x0004 | Ctrl held                |
//! | `GDK_MOD1_MASK`     | 3   | 0x0008 | Alt held                 |
//! | `GDK_MOD2_MASK`     | 4   | 0x0010 | Num Lock                 |
//!
//! Lock keys are special: their bit reports a *toggled* state, and GDK
//! reports the state as it was *before* the event, so the bit in a lock key's
//! own press event is stale.  [`crate::domain::lock_state`] corrects for this.

/// `GDK_KEY_Num_Lock`.
pub const KEY_NUM_LOCK: u32 = 0xFF7F;
/// `GDK_KEY_Caps_Lock`.
pub const KEY_CAPS_LOCK: u32 = 0xFFE5;
/// `GDK_KEY_Shift_Lock`.
pub const KEY_SHIFT_LOCK: u32 = 0xFFE6;

/// `GDK_KEY_A` (uppercase 'A').
pub const KEY_A: u32 = 0x0041;
/// `GDK_KEY_Return`.
pub const KEY_RETURN: u32 = 0xFF0D;

/// GDK modifier state bitmask as carried in the canonical `modifiers` field.
///
/// The value is passed through to the framework unchanged apart from the lock
/// bits, so this is a thin newtype over the raw `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierMask(pub u32);

impl ModifierMask {
    pub const SHIFT: u32 = 1 << 0;
    pub const LOCK: u32 = 1 << 1;
    pub const CONTROL: u32 = 1 << 2;
    pub const MOD1: u32 = 1 << 3;
    pub const MOD2: u32 = 1 << 4;
    pub const MOD3: u32 = 1 << 5;
    pub const MOD4: u32 = 1 << 6;
    pub const MOD5: u32 = 1 << 7;
    pub const SUPER: u32 = 1 << 26;
    pub const HYPER: u32 = 1 << 27;
    pub const META: u32 = 1 << 28;

    /// Bits owned by the lock-key tracker rather than by the native state.
    pub const LOCK_BITS: u32 = Self::LOCK | Self::MOD2;

    /// Returns `true` if every bit in `bits` is set.
    pub fn contains(&self, bits: u32) -> bool {
        self.0 & bits == bits
    }

    /// Returns the mask with the tracker-owned lock bits removed.
    pub fn without_lock_bits(self) -> Self {
        Self(self.0 & !Self::LOCK_BITS)
    }
}

impl std::ops::BitOr<u32> for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: u32) -> ModifierMask {
        ModifierMask(self.0 | rhs)
    }
}

/// A key whose meaning is a persistent toggle rather than a momentary hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKey {
    NumLock,
    CapsLock,
    ShiftLock,
}

impl LockKey {
    /// Classifies a GDK keysym.
    ///
    /// Returns `None` for every key that is not lock-capable.
    pub fn from_keyval(keyval: u32) -> Option<Self> {
        match keyval {
            KEY_NUM_LOCK => Some(LockKey::NumLock),
            KEY_CAPS_LOCK => Some(LockKey::CapsLock),
            KEY_SHIFT_LOCK => Some(LockKey::ShiftLock),
            _ => None,
        }
    }

    /// The modifier bit that represents this lock being active.
    ///
    /// Caps Lock and Shift Lock share `GDK_LOCK_MASK`.
    pub fn modifier_bit(self) -> u32 {
        match self {
            LockKey::NumLock => ModifierMask::MOD2,
            LockKey::CapsLock | LockKey::ShiftLock => ModifierMask::LOCK,
        }
    }
}
