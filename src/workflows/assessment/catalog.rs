use super::domain::{
    AnswerOption, Assessment, Category, CategoryTheme, DefinitionError, Question,
};

/// Built-in assessment definitions, validated once at startup.
#[derive(Debug)]
pub struct AssessmentCatalog {
    assessments: Vec<Assessment>,
}

impl AssessmentCatalog {
    pub fn standard() -> Result<Self, DefinitionError> {
        let assessments = vec![owner_centricity(), personal_vision()];
        for assessment in &assessments {
            assessment.validate()?;
        }

        Ok(Self { assessments })
    }

    pub fn get(&self, slug: &str) -> Option<&Assessment> {
        self.assessments
            .iter()
            .find(|assessment| assessment.slug == slug)
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }
}

fn option(text: &'static str, score: u32, explanation: &'static str) -> AnswerOption {
    AnswerOption {
        text,
        score,
        explanation,
    }
}

/// The owner centricity assessment: how far the business runs without the
/// owner's personal involvement, across five weighted functional areas.
pub fn owner_centricity() -> Assessment {
    Assessment {
        slug: "owner-centricity",
        title: "Owner Centricity Assessment",
        categories: vec![
            Category {
                name: "Sales & Customer Management",
                weight: 0.25,
                theme: CategoryTheme::Blue,
                description: "Customer relationships, sales processes, and revenue generation",
                questions: vec![
                    Question {
                        id: "customer_relationships",
                        prompt: "Who maintains primary relationships with your top 10 customers?",
                        options: vec![
                            option(
                                "Dedicated sales team members exclusively",
                                4,
                                "Excellent - no owner dependency in customer relationships",
                            ),
                            option(
                                "Mix of owner and sales team",
                                3,
                                "Good - shared responsibility reduces risk",
                            ),
                            option(
                                "Primarily owner with some team backup",
                                2,
                                "Concerning - high owner dependency",
                            ),
                            option(
                                "Owner maintains all key customer relationships",
                                1,
                                "Critical risk - complete owner dependency",
                            ),
                        ],
                    },
                    Question {
                        id: "sales_process",
                        prompt: "How documented and systematized are your sales processes?",
                        options: vec![
                            option(
                                "Fully documented CRM with standardized processes",
                                4,
                                "Excellent - systematic approach enables consistent results",
                            ),
                            option(
                                "Good documentation with minor gaps",
                                3,
                                "Good - mostly systematic with some informal processes",
                            ),
                            option(
                                "Basic documentation, relies on experience",
                                2,
                                "Average - too dependent on individual experience",
                            ),
                            option(
                                "Mostly undocumented, owner-dependent",
                                1,
                                "Poor - success depends entirely on owner knowledge",
                            ),
                        ],
                    },
                    Question {
                        id: "new_customer_acquisition",
                        prompt: "Who handles new customer acquisition and development?",
                        options: vec![
                            option(
                                "Dedicated sales team with proven track record",
                                4,
                                "Excellent - sustainable growth capability",
                            ),
                            option(
                                "Sales team with owner oversight and support",
                                3,
                                "Good - team driven with owner guidance",
                            ),
                            option(
                                "Owner primary with team support",
                                2,
                                "Concerning - growth depends heavily on owner",
                            ),
                            option(
                                "Owner handles all new business development",
                                1,
                                "Critical - growth completely owner dependent",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Operations & Production",
                weight: 0.20,
                theme: CategoryTheme::Green,
                description: "Daily operations, quality control, and production management",
                questions: vec![
                    Question {
                        id: "daily_operations",
                        prompt: "Who manages daily operations when you're away for 2+ weeks?",
                        options: vec![
                            option(
                                "Operations manager handles everything smoothly",
                                4,
                                "Excellent - business runs independently",
                            ),
                            option(
                                "Manager handles most, occasional consultation needed",
                                3,
                                "Good - minimal owner dependency",
                            ),
                            option(
                                "Manager handles routine, owner needed for problems",
                                2,
                                "Average - moderate dependency",
                            ),
                            option(
                                "Operations struggle significantly without owner",
                                1,
                                "Poor - critical owner dependency",
                            ),
                        ],
                    },
                    Question {
                        id: "quality_control",
                        prompt: "How are quality standards maintained and monitored?",
                        options: vec![
                            option(
                                "Systematic quality management with documented procedures",
                                4,
                                "Excellent - consistent quality without owner involvement",
                            ),
                            option(
                                "Good systems with regular owner oversight",
                                3,
                                "Good - systems in place with owner guidance",
                            ),
                            option(
                                "Basic systems requiring owner involvement",
                                2,
                                "Average - quality depends on owner presence",
                            ),
                            option(
                                "Quality control depends primarily on owner",
                                1,
                                "Poor - quality risks without owner",
                            ),
                        ],
                    },
                    Question {
                        id: "vendor_management",
                        prompt: "Who manages key vendor and supplier relationships?",
                        options: vec![
                            option(
                                "Purchasing manager with established relationships",
                                4,
                                "Excellent - diversified vendor management",
                            ),
                            option(
                                "Team manages routine, owner handles strategic vendors",
                                3,
                                "Good - balanced approach",
                            ),
                            option(
                                "Owner primary contact with team support",
                                2,
                                "Average - moderate owner dependency",
                            ),
                            option(
                                "Owner maintains all critical vendor relationships",
                                1,
                                "Poor - complete vendor relationship dependency",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Financial Management",
                weight: 0.20,
                theme: CategoryTheme::Purple,
                description: "Financial reporting, cash management, and fiscal controls",
                questions: vec![
                    Question {
                        id: "financial_reporting",
                        prompt: "Who prepares and analyzes monthly financial reports?",
                        options: vec![
                            option(
                                "CFO/Controller produces comprehensive reports",
                                4,
                                "Excellent - professional financial management",
                            ),
                            option(
                                "Bookkeeper prepares, owner analyzes",
                                3,
                                "Good - shared financial responsibilities",
                            ),
                            option(
                                "Owner compiles and analyzes most reports",
                                2,
                                "Average - high owner involvement in finance",
                            ),
                            option(
                                "Owner handles most financial management",
                                1,
                                "Poor - complete financial dependency on owner",
                            ),
                        ],
                    },
                    Question {
                        id: "cash_management",
                        prompt: "Who makes cash management and investment decisions?",
                        options: vec![
                            option(
                                "Financial manager with established policies",
                                4,
                                "Excellent - systematic cash management",
                            ),
                            option(
                                "Team makes routine, owner approves major decisions",
                                3,
                                "Good - delegated authority with oversight",
                            ),
                            option(
                                "Owner makes most financial decisions",
                                2,
                                "Average - centralized decision making",
                            ),
                            option(
                                "All financial decisions require owner approval",
                                1,
                                "Poor - bottleneck in financial operations",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Strategic Decision Making",
                weight: 0.25,
                theme: CategoryTheme::Teal,
                description: "Strategic planning, major decisions, and business direction",
                questions: vec![
                    Question {
                        id: "strategic_planning",
                        prompt: "Who participates in strategic planning and major decisions?",
                        options: vec![
                            option(
                                "Management team leads strategic planning process",
                                4,
                                "Excellent - distributed strategic thinking",
                            ),
                            option(
                                "Management participates, owner guides direction",
                                3,
                                "Good - collaborative strategic planning",
                            ),
                            option(
                                "Owner leads with management input",
                                2,
                                "Average - owner-led planning",
                            ),
                            option(
                                "Owner makes all strategic decisions alone",
                                1,
                                "Poor - no strategic succession capability",
                            ),
                        ],
                    },
                    Question {
                        id: "problem_solving",
                        prompt: "When significant problems arise, who typically resolves them?",
                        options: vec![
                            option(
                                "Management team resolves most issues independently",
                                4,
                                "Excellent - autonomous problem-solving capability",
                            ),
                            option(
                                "Management handles routine, escalates complex issues",
                                3,
                                "Good - appropriate escalation process",
                            ),
                            option(
                                "Owner involved in most problem resolution",
                                2,
                                "Average - high owner involvement needed",
                            ),
                            option(
                                "All significant problems come directly to owner",
                                1,
                                "Poor - owner is single point of failure",
                            ),
                        ],
                    },
                    Question {
                        id: "external_relationships",
                        prompt: "Who manages relationships with banks, lawyers, accountants?",
                        options: vec![
                            option(
                                "Designated team members manage each relationship",
                                4,
                                "Excellent - professional relationship distribution",
                            ),
                            option(
                                "Team involved, owner maintains primary contact",
                                3,
                                "Good - shared professional relationships",
                            ),
                            option(
                                "Owner primary with team support",
                                2,
                                "Average - owner-centric relationships",
                            ),
                            option(
                                "Owner maintains all external relationships",
                                1,
                                "Poor - complete relationship dependency",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Innovation & Development",
                weight: 0.10,
                theme: CategoryTheme::Orange,
                description: "Product development, innovation, and business improvement",
                questions: vec![Question {
                    id: "innovation_process",
                    prompt: "Who drives product/service innovation and development?",
                    options: vec![
                        option(
                            "Innovation team with systematic process",
                            4,
                            "Excellent - sustainable innovation capability",
                        ),
                        option(
                            "Team contributes ideas, owner provides direction",
                            3,
                            "Good - collaborative innovation",
                        ),
                        option(
                            "Owner primary innovator with team input",
                            2,
                            "Average - owner-dependent innovation",
                        ),
                        option(
                            "Owner exclusively drives all innovation",
                            1,
                            "Poor - innovation stops without owner",
                        ),
                    ],
                }],
            },
        ],
    }
}

/// The personal vision assessment: readiness of the owner's life plan beyond
/// the business, on a five-point scale per question.
pub fn personal_vision() -> Assessment {
    Assessment {
        slug: "personal-vision",
        title: "Personal Vision Assessment",
        categories: vec![
            Category {
                name: "Financial Lifestyle & Security",
                weight: 0.25,
                theme: CategoryTheme::Green,
                description: "Post-exit financial planning and lifestyle goals",
                questions: vec![
                    Question {
                        id: "income_target",
                        prompt: "How well defined is your desired post-exit annual income?",
                        options: vec![
                            option(
                                "Target set with an advisor and stress-tested against expenses",
                                5,
                                "Excellent - income needs fully quantified",
                            ),
                            option(
                                "Specific target documented in a written plan",
                                4,
                                "Good - concrete figure to plan around",
                            ),
                            option(
                                "Working figure discussed with family",
                                3,
                                "Average - directionally useful, not validated",
                            ),
                            option(
                                "Rough sense, nothing written down",
                                2,
                                "Concerning - plans built on guesswork",
                            ),
                            option(
                                "Have not settled on a number yet",
                                1,
                                "Critical - wealth gap cannot be sized",
                            ),
                        ],
                    },
                    Question {
                        id: "risk_posture",
                        prompt: "How settled is your investment risk posture for exit proceeds?",
                        options: vec![
                            option(
                                "Documented allocation policy built with an investment advisor",
                                5,
                                "Excellent - proceeds have a home before the sale",
                            ),
                            option(
                                "Risk tolerance clear, allocation still in progress",
                                4,
                                "Good - direction set, details pending",
                            ),
                            option(
                                "General preference between growth and preservation",
                                3,
                                "Average - posture known, plan unwritten",
                            ),
                            option(
                                "Unsure how much risk is acceptable",
                                2,
                                "Concerning - proceeds at risk of drift",
                            ),
                            option(
                                "Have not considered post-exit investing",
                                1,
                                "Critical - no plan for the largest asset event",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Activity & Engagement",
                weight: 0.25,
                theme: CategoryTheme::Blue,
                description: "Work involvement and daily activity planning",
                questions: vec![
                    Question {
                        id: "work_involvement",
                        prompt: "How clear are you on your desired work involvement after exit?",
                        options: vec![
                            option(
                                "Committed plan, whether full retirement, board seats, or a new venture",
                                5,
                                "Excellent - next chapter already chosen",
                            ),
                            option(
                                "Preferred path chosen, details being arranged",
                                4,
                                "Good - clear direction with open logistics",
                            ),
                            option(
                                "Narrowed to two or three possibilities",
                                3,
                                "Average - options identified, none committed",
                            ),
                            option(
                                "Several appealing ideas, none explored",
                                2,
                                "Concerning - exploration not started",
                            ),
                            option(
                                "No picture of day one after exit",
                                1,
                                "Critical - identity risk on transition day",
                            ),
                        ],
                    },
                    Question {
                        id: "weekly_structure",
                        prompt: "How developed is your picture of a typical post-exit week?",
                        options: vec![
                            option(
                                "Week mapped out and trialed during time away from the business",
                                5,
                                "Excellent - plan tested in practice",
                            ),
                            option(
                                "Main activities identified with rough time commitments",
                                4,
                                "Good - structure forming",
                            ),
                            option(
                                "List of interests, no structure yet",
                                3,
                                "Average - raw material without a schedule",
                            ),
                            option(
                                "Vague notions of staying busy",
                                2,
                                "Concerning - boredom risk underestimated",
                            ),
                            option(
                                "Have not pictured it at all",
                                1,
                                "Critical - no plan for 50+ unstructured hours a week",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Identity & Purpose",
                weight: 0.30,
                theme: CategoryTheme::Purple,
                description: "Sense of identity and meaning beyond the business",
                questions: vec![
                    Question {
                        id: "identity_beyond_business",
                        prompt: "How strong is your sense of identity outside the owner role?",
                        options: vec![
                            option(
                                "Rich identity from family, community, and pursuits beyond the company",
                                5,
                                "Excellent - exit changes a job, not a self",
                            ),
                            option(
                                "Meaningful roles outside work, business still primary",
                                4,
                                "Good - foundation to build on",
                            ),
                            option(
                                "Some outside interests, business dominates",
                                3,
                                "Average - identity heavily tied to the company",
                            ),
                            option(
                                "Business is nearly the whole identity",
                                2,
                                "Concerning - transition will feel like a loss",
                            ),
                            option(
                                "Cannot imagine who I am without the business",
                                1,
                                "Critical - highest risk of seller's remorse",
                            ),
                        ],
                    },
                    Question {
                        id: "post_exit_purpose",
                        prompt: "How defined is the purpose that will replace running the business?",
                        options: vec![
                            option(
                                "Specific mission already underway alongside the business",
                                5,
                                "Excellent - purpose precedes the exit",
                            ),
                            option(
                                "Cause or project selected, start date tied to exit",
                                4,
                                "Good - purpose waiting on the transition",
                            ),
                            option(
                                "Several causes under consideration",
                                3,
                                "Average - intent without commitment",
                            ),
                            option(
                                "Expect to find purpose after exiting",
                                2,
                                "Concerning - purpose vacuum likely",
                            ),
                            option(
                                "Purpose has not come up in planning",
                                1,
                                "Critical - most common driver of failed exits",
                            ),
                        ],
                    },
                ],
            },
            Category {
                name: "Relationships & Family",
                weight: 0.20,
                theme: CategoryTheme::Teal,
                description: "Family alignment and key relationships through the transition",
                questions: vec![
                    Question {
                        id: "family_alignment",
                        prompt: "How aligned is your family with your exit timeline and plans?",
                        options: vec![
                            option(
                                "Family engaged in planning sessions and fully aligned",
                                5,
                                "Excellent - no surprises at the closing table",
                            ),
                            option(
                                "Spouse/partner aligned, wider family informed",
                                4,
                                "Good - core household on board",
                            ),
                            option(
                                "High-level conversations held, details unshared",
                                3,
                                "Average - alignment assumed, not confirmed",
                            ),
                            option(
                                "Family knows an exit is possible someday",
                                2,
                                "Concerning - expectations may collide",
                            ),
                            option(
                                "Exit plans not discussed at home",
                                1,
                                "Critical - family discovery at the worst moment",
                            ),
                        ],
                    },
                    Question {
                        id: "relationship_network",
                        prompt: "How strong is your social network outside the business?",
                        options: vec![
                            option(
                                "Active friendships and communities unrelated to the company",
                                5,
                                "Excellent - network survives the transition",
                            ),
                            option(
                                "Solid outside friendships, business circle still larger",
                                4,
                                "Good - balance within reach",
                            ),
                            option(
                                "Mostly industry and work relationships",
                                3,
                                "Average - network shrinks on exit day",
                            ),
                            option(
                                "Nearly all relationships run through the business",
                                2,
                                "Concerning - isolation risk after exit",
                            ),
                            option(
                                "No meaningful relationships outside work",
                                1,
                                "Critical - highest post-exit isolation risk",
                            ),
                        ],
                    },
                ],
            },
        ],
    }
}
