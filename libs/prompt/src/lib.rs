//! Prompt construction for the DJ document generator.
//!
//! `build_prompt` is the only entry point: a pure mapping from a
//! [`GenerationRequest`] to the instruction text sent to the language
//! model. Every optional field falls back to a bracketed placeholder so
//! the generated document stays usable by a human.

mod request;
mod template;

pub use request::{
    CreativeBrief, EventType, GenerationRequest, McScriptType, OutputTone,
    RefinementAction, RefinementRequest, SalesObjectionType,
    SocialMediaPlatform, PlaylistType, EmailFollowUpType, Template,
    TemplateRequest,
};
pub use template::{build_prompt, wants_web_grounding};
