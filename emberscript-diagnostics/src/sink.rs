use crate::marker::MarkerSet;

/// Marker sink - anything that can receive published marker sets for display.
///
/// Publishing an empty set is meaningful: it tells the presentation layer to
/// clear whatever it is currently showing.
pub trait MarkerSink {
    fn publish(&mut self, markers: &MarkerSet);
}

impl MarkerSink for () {
    fn publish(&mut self, _: &MarkerSet) {}
}

/// Retains only the most recently published set.
impl MarkerSink for MarkerSet {
    fn publish(&mut self, markers: &MarkerSet) {
        self.clone_from(markers);
    }
}

/// Records every published set, in order. Mostly useful in tests.
impl MarkerSink for Vec<MarkerSet> {
    fn publish(&mut self, markers: &MarkerSet) {
        self.push(markers.clone());
    }
}
