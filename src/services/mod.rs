// Collaborator-facing services. Each service defines the trait it needs from
// its HTTP collaborator and is generic over it, so tests can substitute mocks.

pub mod chance;
pub mod mentors;
pub mod report;
pub mod scoring;
