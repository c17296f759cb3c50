//! Events published by the renderer and the listener registry that receives them.

/// Payload of a node click.
#[derive(Clone, Debug, PartialEq)]
pub struct PayloadNodeClick<Id> {
	pub node: Id,
	pub name: String,
}

/// Something observable happened in the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum RendererEvent<Id> {
	/// A press and release landed on the same node without dragging it.
	NodeClick(PayloadNodeClick<Id>),
}

impl<Id> RendererEvent<Id> {
	/// Event name as seen by listeners on the host page.
	pub fn name(&self) -> &'static str {
		match self {
			RendererEvent::NodeClick(_) => "node:click",
		}
	}
}

/// Handle returned by [`Listeners::add`], used to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<Id> = Box<dyn FnMut(&RendererEvent<Id>)>;

/// Ordered set of event listeners.
pub struct Listeners<Id> {
	next_id: u64,
	entries: Vec<(ListenerId, Listener<Id>)>,
}

impl<Id> Default for Listeners<Id> {
	fn default() -> Self {
		Self {
			next_id: 0,
			entries: Vec::new(),
		}
	}
}

impl<Id> Listeners<Id> {
	pub fn add(&mut self, listener: impl FnMut(&RendererEvent<Id>) + 'static) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, Box::new(listener)));
		id
	}

	/// Returns whether a listener was removed.
	pub fn remove(&mut self, id: ListenerId) -> bool {
		let before = self.entries.len();
		self.entries.retain(|(entry, _)| *entry != id);
		self.entries.len() != before
	}

	/// Deliver `event` to every listener in registration order.
	pub fn publish(&mut self, event: &RendererEvent<Id>) {
		for (_, listener) in &mut self.entries {
			listener(event);
		}
	}

	#[cfg(test)]
	fn len(&self) -> usize {
		self.entries.len()
	}
}
