/// A Constraint object is a handle to a single linear constraint row in a [crate::ModelAPI].
///
/// The handle is returned by [crate::ModelAPI::constraint] and can be passed to
/// [crate::ModelAPI::primal_solution] after solving to read the row activity, that is the value
/// of the constraint expression without its constant term.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub struct Constraint {
    pub(crate) model : u64,
    pub(crate) index : usize,
}

impl Constraint {
    pub(crate) fn new(model : u64, index : usize) -> Constraint { Constraint{ model, index } }
    /// Index of the constraint in the model it belongs to.
    pub fn index(&self) -> usize { self.index }
    pub fn model_id(&self) -> u64 { self.model }
}
