use crate::graph::node::GraphNode;

/// Builds identical voice graphs for the synth's voice pool.
///
/// Any `Fn() -> impl GraphNode` closure is a factory, so a patch is just a
/// function returning a node chain.
pub trait VoiceFactory: Send {
    type Voice: GraphNode;

    fn create_voice(&self) -> Self::Voice;
}

impl<F, T> VoiceFactory for F
where
    F: Fn() -> T + Send,
    T: GraphNode,
{
    type Voice = T;

    fn create_voice(&self) -> Self::Voice {
        self()
    }
}
