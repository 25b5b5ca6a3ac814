use crate::{
    animation::codec::{Identity, TweenCodec},
    animation::keyframes::{Keyframe, KeyframeStore},
    animation::timing::{Clock, SystemClock, TimeMapper, Timing, TweenOptions},
    animation::unit_tree::UnitTree,
    foundation::error::TweenResult,
};

/// Handle returned by [`Tween::on_update`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Keyframe tween over values of any shape the codec `C` can express.
///
/// A tween owns its keyframes, a resolved [`Timing`], and a live working value. Each
/// [`update`](Tween::update) maps time to progress, drives the linear units of the active
/// segment, and notifies listeners when the produced output differs from the last one.
///
/// Everything runs synchronously on the caller's thread; an external driver is expected to
/// call `update` on whatever cadence it needs.
pub struct Tween<C: TweenCodec = Identity> {
    codec: C,
    store: KeyframeStore,
    tree: UnitTree,
    mapper: TimeMapper,
    listeners: Vec<(ListenerId, Listener<C::Output>)>,
    next_listener: u64,
    last_progress: Option<f64>,
    last_output: Option<C::Output>,
}

impl<C: TweenCodec + Default> Tween<C> {
    /// Two-keyframe tween from `from` to `to`.
    pub fn between(from: C::Input, to: C::Input, options: TweenOptions) -> TweenResult<Self> {
        Self::between_with(C::default(), from, to, options)
    }

    /// Tween over an explicit keyframe list.
    pub fn from_keyframes(
        keyframes: Vec<Keyframe<C::Input>>,
        options: TweenOptions,
    ) -> TweenResult<Self> {
        Self::from_keyframes_with(C::default(), keyframes, options)
    }
}

impl<C: TweenCodec> Tween<C> {
    /// [`Tween::between`] with an explicit codec.
    pub fn between_with(
        codec: C,
        from: C::Input,
        to: C::Input,
        options: TweenOptions,
    ) -> TweenResult<Self> {
        let keyframes = vec![Keyframe::at(0.0, from), Keyframe::at(1.0, to)];
        Self::from_keyframes_with(codec, keyframes, options)
    }

    /// [`Tween::from_keyframes`] with an explicit codec.
    #[tracing::instrument(skip_all, fields(keyframes = keyframes.len()))]
    pub fn from_keyframes_with(
        codec: C,
        keyframes: Vec<Keyframe<C::Input>>,
        options: TweenOptions,
    ) -> TweenResult<Self> {
        let timing = options.resolve()?;
        let store = KeyframeStore::new(
            keyframes
                .into_iter()
                .map(|k| k.map(|v| codec.parse_in(v)))
                .collect(),
        )?;
        let tree = UnitTree::build(&store);

        Ok(Self {
            codec,
            store,
            tree,
            mapper: TimeMapper::new(timing, Box::new(SystemClock::default())),
            listeners: Vec::new(),
            next_listener: 0,
            last_progress: None,
            last_output: None,
        })
    }

    /// Read wall-clock time from `clock` instead of the system clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.mapper.set_clock(Box::new(clock));
        self
    }

    /// Resolved timing configuration.
    pub fn timing(&self) -> &Timing {
        self.mapper.timing()
    }

    /// Progress computed by the last update, if any.
    pub fn progress(&self) -> Option<f64> {
        self.last_progress
    }

    /// Make the next wall-clock [`update`](Tween::update) the new time origin.
    pub fn restart(&mut self) {
        self.mapper.restart();
    }

    /// Advance to the current wall-clock time.
    ///
    /// The first call fixes the time origin. Returns the latest output.
    pub fn update(&mut self) -> Option<C::Output> {
        self.step(None)
    }

    /// Advance to `time` milliseconds since the timeline began.
    pub fn update_at(&mut self, time: f64) -> Option<C::Output> {
        self.step(Some(time))
    }

    fn step(&mut self, time: Option<f64>) -> Option<C::Output> {
        let progress = self.mapper.map(time);
        if self.last_progress == Some(progress) {
            return self.last_output.clone();
        }
        self.last_progress = Some(progress);

        self.tree.apply(progress);
        let out = self.codec.parse_out(self.tree.working());
        if self.last_output.as_ref() != Some(&out) {
            tracing::trace!(progress, listeners = self.listeners.len(), "tween output changed");
            for (_, listener) in &mut self.listeners {
                listener(&out);
            }
            self.last_output = Some(out);
        }
        self.last_output.clone()
    }

    /// Subscribe to changed outputs. Listeners run synchronously in subscription order.
    pub fn on_update(&mut self, listener: impl FnMut(&C::Output) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe. Returns false if `id` was not subscribed.
    pub fn off_update(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Value of the first keyframe.
    pub fn from(&self) -> C::Output {
        self.codec.parse_out(&self.store.first().value)
    }

    /// Replace the first keyframe's value and rebuild.
    pub fn set_from(&mut self, value: C::Input) -> TweenResult<()> {
        let store = self.store.with_first(self.codec.parse_in(value))?;
        self.commit(store);
        Ok(())
    }

    /// Value of the last keyframe.
    pub fn to(&self) -> C::Output {
        self.codec.parse_out(&self.store.last().value)
    }

    /// Replace the last keyframe's value and rebuild.
    pub fn set_to(&mut self, value: C::Input) -> TweenResult<()> {
        let store = self.store.with_last(self.codec.parse_in(value))?;
        self.commit(store);
        Ok(())
    }

    /// All keyframes with their resolved offsets.
    pub fn keyframes(&self) -> Vec<Keyframe<C::Output>> {
        self.store
            .frames()
            .iter()
            .map(|f| Keyframe::at(f.offset, self.codec.parse_out(&f.value)))
            .collect()
    }

    /// Replace every keyframe and rebuild.
    pub fn set_keyframes(&mut self, keyframes: Vec<Keyframe<C::Input>>) -> TweenResult<()> {
        let store = KeyframeStore::new(
            keyframes
                .into_iter()
                .map(|k| k.map(|v| self.codec.parse_in(v)))
                .collect(),
        )?;
        self.commit(store);
        Ok(())
    }

    // Only reached with a store that already passed validation.
    fn commit(&mut self, store: KeyframeStore) {
        self.tree = UnitTree::build(&store);
        self.store = store;
        self.last_progress = None;
    }
}

impl<C: TweenCodec> std::fmt::Debug for Tween<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("store", &self.store)
            .field("mapper", &self.mapper)
            .field("listeners", &self.listeners.len())
            .field("last_progress", &self.last_progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
