//! Sequence and map targets.
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use super::{Context, Decode, Segment, TargetKind};
use crate::error::DecodeError;
use crate::value::Value;

/// Resized to the source length; surviving elements are decoded in place.
impl<T: Decode + Default> Decode for Vec<T> {
    fn kind() -> TargetKind { TargetKind::Sequence(Box::new(T::kind())) }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        let Value::Sequence(items) = value else {
            return Err(cx.mismatch(Self::kind(), value));
        };
        self.truncate(items.len());
        for (index, item) in items.iter().enumerate() {
            if index == self.len() {
                self.push(T::default());
            }
            let slot = &mut self[index];
            cx.descend(Segment::Index(index), |cx| slot.decode(item, cx))?;
        }
        Ok(())
    }
}

/// Extra source elements are dropped; missing ones reset the slot to default.
impl<T: Decode + Default, const N: usize> Decode for [T; N] {
    fn kind() -> TargetKind { TargetKind::Sequence(Box::new(T::kind())) }

    fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
        let Value::Sequence(items) = value else {
            return Err(cx.mismatch(Self::kind(), value));
        };
        for (index, slot) in self.iter_mut().enumerate() {
            match items.get(index) {
                Some(item) => cx.descend(Segment::Index(index), |cx| slot.decode(item, cx))?,
                None => *slot = T::default(),
            }
        }
        Ok(())
    }
}

// Maps keep existing entries; each incoming entry decodes into a fresh default.
macro_rules! impl_decode_map {
    ($($map:ident),* $(,)?) => {
        $(impl<T: Decode + Default> Decode for $map<String, T> {
            fn kind() -> TargetKind { TargetKind::Map(Box::new(T::kind())) }

            fn decode(&mut self, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
                let Value::Record(entries) = value else {
                    return Err(cx.mismatch(Self::kind(), value));
                };
                for (key, item) in entries {
                    let mut slot = T::default();
                    cx.descend(Segment::Key(key.clone()), |cx| slot.decode(item, cx))?;
                    self.insert(key.clone(), slot);
                }
                Ok(())
            }
        })*
    };
}

impl_decode_map!(IndexMap, BTreeMap, HashMap);

// ------------------------------- Tests ------------------------------------ //
