//! Terms, Privacy and Cookies pages.

use dioxus::prelude::*;

use crate::app::components::legal::{LegalDocument, LegalPage, LegalSection};

const EFFECTIVE_DATE: &str = "February 22, 2026";

pub static TERMS: LegalDocument = LegalDocument {
    title: "Terms and Conditions",
    effective_date: EFFECTIVE_DATE,
    sections: &[
        LegalSection {
            heading: "Acceptance of Terms",
            paragraphs: &[
                "Welcome to survex.app. By using this site, registering as a Survex member, \
                 participating in the membership points program, or taking part in any \
                 questionnaire or study offered by Survex, you agree to these Terms and confirm \
                 that you have read and accepted our Privacy Policy.",
                "Survex may change, modify, add to, or remove portions of these Terms at any time. \
                 Your continued use of this site after changes are posted constitutes your \
                 acceptance of them.",
            ],
        },
        LegalSection {
            heading: "Account Eligibility",
            paragraphs: &[
                "You must provide accurate information and maintain only one account per person \
                 and device unless explicitly authorized.",
                "Survex prohibits anyone under the age of thirteen (13), or the minimum age \
                 applicable in your jurisdiction, from using its services. Accounts of members \
                 found to be under age are deactivated and their data deleted.",
            ],
        },
        LegalSection {
            heading: "Survey Participation",
            paragraphs: &[
                "You agree not to interfere with or disrupt the Survex sites or services, and not \
                 to use any tool that manipulates your device to gain advantages in any rewards \
                 program.",
                "Prohibited activities include unauthorized access, account sharing, multiple \
                 accounts, identity misrepresentation (including VPNs, proxies or fake IDs), false \
                 information, automation and cheats, survey manipulation, artificial activity, and \
                 exploiting errors. Violations may lead to suspension or cancellation of your \
                 account without notice.",
            ],
        },
        LegalSection {
            heading: "Rewards and Balance",
            paragraphs: &[
                "Incentives are offered to encourage participation and do not constitute \
                 compensation for time spent. Balances are not bank accounts, accrue no interest, \
                 and cannot be transferred or combined with another member's balance.",
                "Rewards posted in error are removed; rewards obtained fraudulently are removed \
                 and the account may be suspended or terminated. Amounts are deducted at the time \
                 the redemption request is made.",
                "The minimum redemption threshold is the equivalent of twenty US dollars (USD 20) \
                 unless a lower option is offered. Redemptions are limited to two (2) per 24-hour \
                 period. Questions about your balance can be sent to Support@survex.app.",
            ],
        },
        LegalSection {
            heading: "Limitation of Liability",
            paragraphs: &[
                "Your use of the Survex sites and services is at your own risk. To the maximum \
                 extent permitted by law, Survex disclaims all warranties and is not liable for \
                 errors in content, interruptions of service, third-party products or offers, or \
                 the cancellation of any rewards program, including unredeemed rewards.",
            ],
        },
    ],
};

pub static PRIVACY: LegalDocument = LegalDocument {
    title: "Privacy Policy",
    effective_date: EFFECTIVE_DATE,
    sections: &[
        LegalSection {
            heading: "Information We Collect",
            paragraphs: &[
                "Registration and profile data such as your name, email address, postal address \
                 and contact details; account credentials; transaction and redemption history; \
                 support communications; and the answers you give in market research.",
                "While you browse, cookies and similar technologies capture technical data such \
                 as browser type, device details, IP address and operating system.",
            ],
        },
        LegalSection {
            heading: "How We Use Your Information",
            paragraphs: &[
                "To provide the features you request, administer your account, keep the platform \
                 secure, analyze usage, conduct market research, manage rewards, and, with your \
                 consent, send communications from Survex and its partners.",
                "When you take part in an offer, you direct us to share your qualification data \
                 and your activity within that offer with the partner running it.",
            ],
        },
        LegalSection {
            heading: "Data Sharing",
            paragraphs: &[
                "Survex may publish aggregated, anonymized statistics and may give service \
                 providers access to personal data only as needed to operate the service. Data \
                 may also be transferred in a corporate reorganization or disclosed when required \
                 by law or to prevent fraud.",
            ],
        },
        LegalSection {
            heading: "Data Security",
            paragraphs: &[
                "We use reasonable measures to protect personal data against loss, misuse or \
                 alteration. No transmission over the internet is entirely secure, and if you use \
                 a shared computer you should close your browser when you finish your session.",
            ],
        },
        LegalSection {
            heading: "Your Choices",
            paragraphs: &[
                "Depending on where you live you may have rights of access, rectification, \
                 erasure, restriction, objection and portability, and the right to withdraw \
                 consent or file a complaint with your data protection authority. Erasure may \
                 require closing your account.",
            ],
        },
        LegalSection {
            heading: "Contact",
            paragraphs: &[
                "Questions about this notice can be sent through the Support page or by email to \
                 Support@survex.app, attention Customer Service.",
            ],
        },
    ],
};

pub static COOKIES: LegalDocument = LegalDocument {
    title: "Cookies Policy",
    effective_date: EFFECTIVE_DATE,
    sections: &[
        LegalSection {
            heading: "What Are Cookies",
            paragraphs: &[
                "Cookies are small text files stored on your device to help websites function, \
                 remember preferences, and improve user experience.",
            ],
        },
        LegalSection {
            heading: "How We Use Cookies",
            paragraphs: &[
                "We use cookies to keep you signed in, protect account security, remember \
                 settings, and measure performance of pages and features.",
            ],
        },
        LegalSection {
            heading: "Third-Party Cookies",
            paragraphs: &[
                "Some integrations may use third-party cookies for survey delivery, fraud \
                 prevention, analytics, or abuse detection.",
            ],
        },
        LegalSection {
            heading: "Managing Cookies",
            paragraphs: &[
                "You can control cookies in your browser settings. Disabling cookies may affect \
                 features like login, survey access, and reward tracking.",
            ],
        },
        LegalSection {
            heading: "Policy Updates",
            paragraphs: &[
                "We may update this Cookies Policy from time to time. Continued use of the \
                 website means you accept the updated policy.",
            ],
        },
    ],
};

#[component]
pub fn Terms() -> Element {
    rsx! { LegalPage { document: &TERMS } }
}

#[component]
pub fn Privacy() -> Element {
    rsx! { LegalPage { document: &PRIVACY } }
}

#[component]
pub fn Cookies() -> Element {
    rsx! { LegalPage { document: &COOKIES } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_share_effective_date() {
        for document in [&TERMS, &PRIVACY, &COOKIES] {
            assert_eq!(document.effective_date, "February 22, 2026");
            assert!(!document.sections.is_empty());
        }
    }

    #[test]
    fn test_cookie_sections_in_order() {
        let headings: Vec<_> = COOKIES.sections.iter().map(|s| s.heading).collect();
        assert_eq!(
            headings,
            [
                "What Are Cookies",
                "How We Use Cookies",
                "Third-Party Cookies",
                "Managing Cookies",
                "Policy Updates"
            ]
        );
    }
}
