use std::fmt;

use serde::{Deserialize, Serialize};

/// One generation request from the client.
///
/// Refinements and fresh generations are never combined: a refinement
/// carries only the instruction and the prior text, so unrelated category
/// fields cannot leak into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationRequest {
    Refinement(RefinementRequest),
    Template(TemplateRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementRequest {
    pub refinement_action: RefinementAction,
    pub original_text: String,
}

/// Shared envelope for fresh generations plus the category payload,
/// discriminated by `templateType`. Each variant carries only the fields
/// relevant to that category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    pub event_type: EventType,
    pub tone: OutputTone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
    #[serde(flatten)]
    pub template: Template,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "templateType")]
pub enum Template {
    #[serde(rename = "Service Agreement", rename_all = "camelCase")]
    Agreement {
        #[serde(default)]
        client_name: Option<String>,
        #[serde(default)]
        dj_name: Option<String>,
        #[serde(default)]
        event_date: Option<String>,
        #[serde(default)]
        venue: Option<String>,
        #[serde(default)]
        total_cost: Option<String>,
        #[serde(default)]
        deposit_amount: Option<String>,
    },
    #[serde(rename = "Deposit Terms", rename_all = "camelCase")]
    DepositTerms {
        #[serde(default)]
        total_cost: Option<String>,
        #[serde(default)]
        deposit_amount: Option<String>,
        #[serde(default)]
        deposit_due_date: Option<String>,
        #[serde(default)]
        payment_methods: Option<String>,
    },
    #[serde(rename = "Email Follow-up", rename_all = "camelCase")]
    EmailFollowUp {
        #[serde(rename = "emailFollowUpType")]
        follow_up_type: EmailFollowUpType,
        #[serde(default)]
        dj_name: Option<String>,
        #[serde(default)]
        client_name: Option<String>,
        #[serde(default)]
        event_date: Option<String>,
    },
    #[serde(rename = "Creative Content")]
    CreativeContent {
        #[serde(flatten)]
        brief: CreativeBrief,
    },
    #[serde(rename = "Music Planning & Playlists", rename_all = "camelCase")]
    MusicPlaylists {
        playlist_type: PlaylistType,
        #[serde(default)]
        client_name: Option<String>,
        #[serde(default)]
        genre_vibe: Option<String>,
        #[serde(default)]
        must_play_songs: Option<String>,
        #[serde(default)]
        do_not_play_songs: Option<String>,
    },
    #[serde(rename = "Sales Assistant (Objection Handling)", rename_all = "camelCase")]
    SalesAssistant {
        #[serde(rename = "salesObjectionType")]
        objection: SalesObjectionType,
        #[serde(default)]
        dj_name: Option<String>,
        #[serde(default)]
        client_name: Option<String>,
        #[serde(default)]
        total_cost: Option<String>,
    },
    #[serde(rename = "Event Checklist")]
    EventChecklist,
    #[serde(rename = "Pre-Event Questionnaire")]
    PreEventQuestionnaire,
    #[serde(rename = "Post-Event Feedback & Testimonial")]
    PostEventQuestionnaire,
    #[serde(rename = "Event Timeline Builder", rename_all = "camelCase")]
    EventTimeline {
        #[serde(default)]
        client_name: Option<String>,
        #[serde(default)]
        event_date: Option<String>,
        #[serde(default)]
        event_start_time: Option<String>,
        #[serde(default)]
        event_end_time: Option<String>,
    },
}

/// Creative-content sub-kinds, discriminated by `creativeContentType`.
/// The AI image/video kinds are driven by a free-text prompt through the
/// image and video tasks; sent down the text path they fall back to the
/// generic creative prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "creativeContentType")]
pub enum CreativeBrief {
    #[serde(rename = "Gig Assistant (MC Scripts)", rename_all = "camelCase")]
    McScript {
        #[serde(rename = "mcScriptType")]
        script_type: McScriptType,
        #[serde(default)]
        client_name: Option<String>,
        #[serde(default)]
        dj_name: Option<String>,
        #[serde(default)]
        client_fun_facts: Option<String>,
    },
    #[serde(rename = "Social Media Post", rename_all = "camelCase")]
    SocialMediaPost {
        #[serde(rename = "socialMediaPlatform")]
        platform: SocialMediaPlatform,
        #[serde(default)]
        dj_name: Option<String>,
        #[serde(default)]
        post_topic: Option<String>,
    },
    #[serde(rename = "Blog Post for Website/SEO", rename_all = "camelCase")]
    BlogPost {
        #[serde(default)]
        dj_name: Option<String>,
        #[serde(default)]
        post_topic: Option<String>,
    },
    #[serde(rename = "AI Image for Social Media")]
    AiImage,
    #[serde(rename = "AI Video for Social Media")]
    AiVideo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    #[serde(rename = "Corporate Event")]
    Corporate,
    #[serde(rename = "Private Party")]
    PrivateParty,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventType::Wedding => "Wedding",
            EventType::Corporate => "Corporate Event",
            EventType::PrivateParty => "Private Party",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputTone {
    Professional,
    #[serde(rename = "Friendly & Casual")]
    Friendly,
    #[serde(rename = "Energetic & Fun")]
    Energetic,
    #[serde(rename = "Concise & To-the-Point")]
    Concise,
}

impl fmt::Display for OutputTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputTone::Professional => "Professional",
            OutputTone::Friendly => "Friendly & Casual",
            OutputTone::Energetic => "Energetic & Fun",
            OutputTone::Concise => "Concise & To-the-Point",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinementAction {
    #[serde(rename = "Make it more professional")]
    MoreProfessional,
    #[serde(rename = "Make it more casual")]
    MoreCasual,
    #[serde(rename = "Make it shorter")]
    Shorter,
    #[serde(rename = "Add more energy")]
    AddEnergy,
}

impl fmt::Display for RefinementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefinementAction::MoreProfessional => "Make it more professional",
            RefinementAction::MoreCasual => "Make it more casual",
            RefinementAction::Shorter => "Make it shorter",
            RefinementAction::AddEnergy => "Add more energy",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailFollowUpType {
    #[serde(rename = "Pre-booking Inquiry Response")]
    PreBooking,
    #[serde(rename = "Post-booking Confirmation")]
    PostBooking,
    #[serde(rename = "One Week Before Event Check-in")]
    PreEvent,
    #[serde(rename = "Post-event Thank You & Review Request")]
    PostEvent,
    #[serde(rename = "Post-event Referral Request")]
    ReferralRequest,
}

impl fmt::Display for EmailFollowUpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmailFollowUpType::PreBooking => "Pre-booking Inquiry Response",
            EmailFollowUpType::PostBooking => "Post-booking Confirmation",
            EmailFollowUpType::PreEvent => "One Week Before Event Check-in",
            EmailFollowUpType::PostEvent => {
                "Post-event Thank You & Review Request"
            }
            EmailFollowUpType::ReferralRequest => {
                "Post-event Referral Request"
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum McScriptType {
    #[serde(rename = "Grand Entrance")]
    GrandEntrance,
    #[serde(rename = "Dinner Introduction")]
    DinnerIntro,
    #[serde(rename = "Dance Floor Opening")]
    DanceFloorOpening,
    #[serde(rename = "Personalized Client Story")]
    PersonalizedStory,
    #[serde(rename = "Last Call / Wind Down")]
    LastCall,
    #[serde(rename = "Closing Remarks & Send-off")]
    ClosingRemarks,
}

impl fmt::Display for McScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            McScriptType::GrandEntrance => "Grand Entrance",
            McScriptType::DinnerIntro => "Dinner Introduction",
            McScriptType::DanceFloorOpening => "Dance Floor Opening",
            McScriptType::PersonalizedStory => "Personalized Client Story",
            McScriptType::LastCall => "Last Call / Wind Down",
            McScriptType::ClosingRemarks => "Closing Remarks & Send-off",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialMediaPlatform {
    Instagram,
    Facebook,
    #[serde(rename = "Twitter / X")]
    TwitterX,
}

impl fmt::Display for SocialMediaPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SocialMediaPlatform::Instagram => "Instagram",
            SocialMediaPlatform::Facebook => "Facebook",
            SocialMediaPlatform::TwitterX => "Twitter / X",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistType {
    #[serde(rename = "Dinner Music")]
    Dinner,
    #[serde(rename = "Cocktail Hour")]
    CocktailHour,
    #[serde(rename = "Open Dancing")]
    OpenDancing,
    #[serde(rename = "Ceremony Selections")]
    Ceremony,
    #[serde(rename = "Custom Playlist")]
    Custom,
}

impl fmt::Display for PlaylistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaylistType::Dinner => "Dinner Music",
            PlaylistType::CocktailHour => "Cocktail Hour",
            PlaylistType::OpenDancing => "Open Dancing",
            PlaylistType::Ceremony => "Ceremony Selections",
            PlaylistType::Custom => "Custom Playlist",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesObjectionType {
    #[serde(rename = "My price is too high")]
    PriceTooHigh,
    #[serde(rename = "Do you have a cheaper package?")]
    CheaperPackage,
    #[serde(rename = "I just need someone to play music")]
    JustNeedMusic,
    #[serde(rename = "Why not just use a Spotify playlist?")]
    SpotifyPlaylist,
    #[serde(rename = "My friend can DJ for free/cheap")]
    FriendDj,
    #[serde(rename = "I need to think about it / talk to my partner")]
    NotSure,
}

impl fmt::Display for SalesObjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SalesObjectionType::PriceTooHigh => "My price is too high",
            SalesObjectionType::CheaperPackage => {
                "Do you have a cheaper package?"
            }
            SalesObjectionType::JustNeedMusic => {
                "I just need someone to play music"
            }
            SalesObjectionType::SpotifyPlaylist => {
                "Why not just use a Spotify playlist?"
            }
            SalesObjectionType::FriendDj => "My friend can DJ for free/cheap",
            SalesObjectionType::NotSure => {
                "I need to think about it / talk to my partner"
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_template_request_by_tag() {
        let json = r#"{
            "templateType": "Service Agreement",
            "eventType": "Wedding",
            "tone": "Professional",
            "clientName": "Alice & Bob"
        }"#;

        let request = serde_json::from_str::<GenerationRequest>(json).unwrap();

        let GenerationRequest::Template(request) = request else {
            panic!("expected a template request");
        };
        assert_eq!(request.event_type, EventType::Wedding);
        let Template::Agreement { client_name, venue, .. } = request.template
        else {
            panic!("expected an agreement");
        };
        assert_eq!(client_name.as_deref(), Some("Alice & Bob"));
        assert_eq!(venue, None);
    }

    #[test]
    fn deserializes_refinement_ignoring_category_fields() {
        let json = r#"{
            "refinementAction": "Make it shorter",
            "originalText": "Dear client...",
            "clientName": "ignored",
            "venue": "ignored too"
        }"#;

        let request = serde_json::from_str::<GenerationRequest>(json).unwrap();

        let GenerationRequest::Refinement(refinement) = request else {
            panic!("expected a refinement");
        };
        assert_eq!(refinement.refinement_action, RefinementAction::Shorter);
        assert_eq!(refinement.original_text, "Dear client...");
    }

    #[test]
    fn deserializes_nested_creative_content_tags() {
        let json = r#"{
            "templateType": "Creative Content",
            "eventType": "Private Party",
            "tone": "Energetic & Fun",
            "creativeContentType": "Gig Assistant (MC Scripts)",
            "mcScriptType": "Grand Entrance",
            "djName": "DJ Spark"
        }"#;

        let request = serde_json::from_str::<GenerationRequest>(json).unwrap();

        let GenerationRequest::Template(TemplateRequest {
            template: Template::CreativeContent { brief },
            ..
        }) = request
        else {
            panic!("expected creative content");
        };
        let CreativeBrief::McScript { script_type, dj_name, .. } = brief else {
            panic!("expected an MC script brief");
        };
        assert_eq!(script_type, McScriptType::GrandEntrance);
        assert_eq!(dj_name.as_deref(), Some("DJ Spark"));
    }

    #[test]
    fn unit_variants_need_only_the_tag() {
        let json = r#"{
            "templateType": "Event Checklist",
            "eventType": "Corporate Event",
            "tone": "Concise & To-the-Point"
        }"#;

        let request = serde_json::from_str::<GenerationRequest>(json).unwrap();

        let GenerationRequest::Template(request) = request else {
            panic!("expected a template request");
        };
        assert!(matches!(request.template, Template::EventChecklist));
    }
}
