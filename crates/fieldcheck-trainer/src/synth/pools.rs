//! Word and phrase pools for synthetic reports.
//!
//! Pools feeding different quality tags share no phrases, so a generated
//! value's tag can always be read back from the pool it came from.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark",
    "Margaret", "Steven", "Sandra", "Priya", "Wei", "Carlos", "Fatima", "Kenji", "Olga",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Patel", "Nguyen", "Kim", "Novak", "Okafor",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "mail.com",
    "inbox.net",
    "company.io",
    "webmail.co",
];

pub const FEEDBACK_TYPES: &[&str] = &["Bug", "Feature", "UI Issue", "Performance", "Other"];

pub const INVALID_FEEDBACK_TYPES: &[&str] = &["asdf", "bugg", "feedbak", "n/a", "???", "xx"];

pub const DEVICES: &[&str] = &[
    "Android 13",
    "iOS 17",
    "Windows 11",
    "macOS 14",
    "Ubuntu 22.04",
    "iPadOS 17",
    "ChromeOS",
];

pub const ACTIONS: &[&str] = &[
    "tap the Save button",
    "open the settings page",
    "log out",
    "upload a file",
    "enter text in the search bar",
    "start the app",
    "switch accounts",
    "change the theme",
    "select a menu item",
    "resize the window",
    "scroll down",
    "drag an item",
];

pub const ISSUES: &[&str] = &[
    "crashes with error code 500",
    "freezes after login",
    "shows a blank screen",
    "does not respond",
    "crashes immediately",
    "ignores the button press",
    "turns the screen blank",
    "resets the form",
    "closes unexpectedly",
    "shows garbled text",
    "runs very slowly",
    "fails with an unknown error",
];

pub const EXPECTED_VERBS: &[&str] = &[
    "save the form",
    "load the page",
    "sync my data",
    "open the file",
    "update the profile",
    "display the results",
    "finish the upload",
    "switch the theme",
];

pub const VERSION_SUFFIXES: &[&str] = &["", "", "-beta", "-rc1"];

pub const VAGUE_STEPS: &[&str] = &[
    "app crashed",
    "it froze",
    "something broke",
    "not sure",
    "can't explain",
    "it just broke",
    "see above",
    "doesn't work",
];

pub const VAGUE_EXPECTED: &[&str] = &[
    "should work",
    "should not crash",
    "work properly",
    "be fine",
    "not this",
];

pub const VAGUE_ACTUAL: &[&str] = &["didn't", "crashed", "broke", "nothing", "wrong", "bad"];

/// Filler words for malformed values.
pub const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "amet", "consectetur", "adipisci", "velit", "quasi", "nemo",
    "enim", "ullam", "corporis", "laboriosam", "aliquid", "commodi", "vel", "illum", "quae",
    "ab", "illo", "inventore", "veritatis", "beatae", "vitae", "dicta", "explicabo", "aspernatur",
    "odit", "fugit", "magni", "dolores", "eos", "ratione", "sequi", "nesciunt", "neque",
    "porro", "quisquam", "numquam", "eius", "modi", "tempora", "incidunt", "labore", "magnam",
];
