use crate::models::{Category, ListingRecord, Tech};

const RAZORPAY_LINK: &str = "https://razorpay.com/...";

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Seed data written on first launch. Only the first four cards carry pricing
/// and a purchase link.
pub fn default_catalog() -> Vec<ListingRecord> {
    vec![
        ListingRecord {
            id: "1".into(),
            title: "Chat Application".into(),
            description: "Next.js Full Stack Project that ...".into(),
            image: "/nextjs-testing-course.jpg".into(),
            link: "/course/testing".into(),
            tech: Some(Tech::Js),
            project: Some(Category::FullStack),
            price: "₹99/-".into(),
            features: features(&["Life Time Access", "Installation Video"]),
            buy_link: RAZORPAY_LINK.into(),
        },
        ListingRecord {
            id: "2".into(),
            title: "Food Delivery App".into(),
            description: "Next.js Full Stack Project that , fullstack...".into(),
            image: "/nextjs-development.jpg".into(),
            link: "/course/nextjs-16".into(),
            tech: Some(Tech::React),
            project: Some(Category::FullStack),
            price: "₹199/-".into(),
            features: features(&["Fast Delivery", "Multiple Payment Options"]),
            buy_link: RAZORPAY_LINK.into(),
        },
        ListingRecord {
            id: "3".into(),
            title: "Google Meet Clone".into(),
            description:
                "Learn GSAP animation with JS Mastery. Practical GSAP tutorials, real projects..."
                    .into(),
            image: "/web-animation-gsap.jpg".into(),
            link: "/course/animations".into(),
            tech: Some(Tech::Gsap),
            project: Some(Category::UiUx),
            price: "₹299/-".into(),
            features: features(&["HD Video Calls", "Screen Sharing"]),
            buy_link: RAZORPAY_LINK.into(),
        },
        ListingRecord {
            id: "4".into(),
            title: "Chat GPT Clone".into(),
            description:
                "Master advanced React patterns and best practices for building scalable apps..."
                    .into(),
            image: "/react-advanced-patterns.jpg".into(),
            link: "/course/react-patterns".into(),
            tech: Some(Tech::React),
            project: Some(Category::Software),
            price: "₹399/-".into(),
            features: features(&["Advanced Patterns", "Scalable Architecture"]),
            buy_link: RAZORPAY_LINK.into(),
        },
        unpriced(
            "5",
            "Full-Stack Web Development",
            "Build complete web applications with modern tools and frameworks...",
            "/fullstack-development.jpg",
            "/course/fullstack",
            Tech::Database,
            Category::FullStack,
        ),
        unpriced(
            "6",
            "UI/UX Design Fundamentals",
            "Learn design principles and create beautiful user interfaces from scratch...",
            "/ui-ux-design-concept.png",
            "/course/design",
            Tech::Video,
            Category::UiUx,
        ),
        unpriced(
            "7",
            "Machine Learning Masterclass",
            "Build real-world ML models with Python and TensorFlow...",
            "/ml-masterclass.jpg",
            "/course/ml",
            Tech::Js,
            Category::AiMl,
        ),
        unpriced(
            "8",
            "DevOps with Kubernetes",
            "Master containerization and orchestration for production deployments...",
            "/devops-kubernetes.jpg",
            "/course/devops",
            Tech::Kubernetes,
            Category::DevOps,
        ),
    ]
}

fn unpriced(
    id: &str,
    title: &str,
    description: &str,
    image: &str,
    link: &str,
    tech: Tech,
    project: Category,
) -> ListingRecord {
    ListingRecord {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        image: image.into(),
        link: link.into(),
        tech: Some(tech),
        project: Some(project),
        price: String::new(),
        features: Vec::new(),
        buy_link: String::new(),
    }
}
