use typed_builder::TypedBuilder;

/// Identity of the agent a message is processed on behalf of. Handlers pass it through to the
/// credential service untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, TypedBuilder)]
pub struct AgentContext {
    #[builder(setter(into))]
    pub agent_name: String,
    #[builder(default, setter(into, strip_option))]
    pub did: Option<String>,
}
